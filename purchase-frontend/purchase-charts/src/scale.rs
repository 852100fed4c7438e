use thousands::Separable;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Categorical scale with equal width slots. The same padding fraction is used between
/// bands and on the outer edges, and any slack is split evenly on both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let (start, stop) = range;
        let n = domain.len() as f64;
        let step = (stop - start) / (n - padding + padding * 2.0).max(1.0);
        let start = start + (stop - start - step * (n - padding)) * 0.5;
        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// The key whose band, padding included, covers offset `x`.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        if self.step <= 0.0 || !x.is_finite() {
            return None;
        }
        let index = ((x - self.start) / self.step).floor();
        if index < 0.0 {
            return None;
        }
        self.domain.get(index as usize).map(String::as_str)
    }

    /// Band centers in domain order, where the axis ticks go.
    pub fn centers(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.domain.iter().enumerate().map(|(i, d)| {
            (
                d.as_str(),
                self.start + self.step * i as f64 + self.bandwidth / 2.0,
            )
        })
    }
}

/// Tick increment for splitting `[start, stop]` into roughly `count` steps. Positive
/// results are the step itself, negative results are the reciprocal of a fractional step.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powi(power as i32);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powi(power as i32)
    } else {
        -(10f64.powi(-power as i32)) / factor
    }
}

/// Absolute tick step, always positive.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let increment = tick_increment(start, stop, count);
    if increment < 0.0 {
        -1.0 / increment
    } else {
        increment
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn is_degenerate(&self) -> bool {
        let (d0, d1) = self.domain;
        !(d0.is_finite() && d1.is_finite()) || d0 == d1
    }

    /// Extends the domain outward to round tick multiples. Degenerate domains are left
    /// as they are.
    pub fn nice(mut self, count: usize) -> Self {
        if self.is_degenerate() || count == 0 {
            return self;
        }
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut previous = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }
        // -0.0 shows up when flooring zero against a negative increment
        let (start, stop) = (start + 0.0, stop + 0.0);
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Maps a domain value into the range. A zero width domain maps everything to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d0 == d1 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + (r1 - r0) * t
    }

    /// Round tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !(d0.is_finite() && d1.is_finite()) {
            return vec![];
        }
        if d0 == d1 {
            return vec![d0];
        }
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        let increment = tick_increment(start, stop, count);
        let mut ticks = Vec::new();
        if increment < 0.0 {
            let inc = -increment;
            let mut i1 = (start * inc).round();
            let mut i2 = (stop * inc).round();
            if i1 / inc < start {
                i1 += 1.0;
            }
            if i2 / inc > stop {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                ticks.push(i / inc);
                i += 1.0;
            }
        } else if increment > 0.0 {
            let mut i1 = (start / increment).round();
            let mut i2 = (stop / increment).round();
            if i1 * increment < start {
                i1 += 1.0;
            }
            if i2 * increment > stop {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                ticks.push(i * increment);
                i += 1.0;
            }
        }
        if d1 < d0 {
            ticks.reverse();
        }
        ticks
    }

    /// Formats a tick with grouped thousands and as many decimals as the tick step needs.
    pub fn tick_label(&self, value: f64, count: usize) -> String {
        let (d0, d1) = self.domain;
        let precision = if self.is_degenerate() {
            0
        } else {
            let step = tick_step(d0.min(d1), d0.max(d1), count);
            (-step.log10().floor()).max(0.0) as usize
        };
        format!("{value:.precision$}").separate_with_commas()
    }
}
