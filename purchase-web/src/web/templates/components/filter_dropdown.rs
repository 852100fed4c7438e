use maud::{html, Render};
use purchase_types::FilterField;

/// One filter control. It submits only its own field, so changing it replaces whatever
/// filter the other control had applied.
pub(crate) struct FilterDropdown<'a> {
    pub(crate) field: FilterField,
    pub(crate) id: &'a str,
    pub(crate) selected: &'a str,
    pub(crate) choices: Vec<&'a str>,
}

impl<'a> Render for FilterDropdown<'a> {
    fn render(&self) -> maud::Markup {
        html! {
            form class="filter" method="get" action="/" {
                input type="hidden" name="field" value=(self.field.column_name());
                label for=(self.id) { (self.field.label()) ": " }
                select name="value" id=(self.id) onchange="this.form.submit()" {
                    @for choice in &self.choices {
                        option value=(choice) selected[*choice == self.selected] {
                            (choice)
                        }
                    }
                }
                noscript {
                    button type="submit" { "Apply" }
                }
            }
        }
    }
}
