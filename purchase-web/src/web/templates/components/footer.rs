use maud::{html, Render};

pub(crate) struct Footer;

impl Render for Footer {
    fn render(&self) -> maud::Markup {
        html! {
            footer {
                span { "Data from the Black Friday retail sales dataset." }
            }
        }
    }
}
