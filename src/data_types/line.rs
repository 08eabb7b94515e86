use crate::theme::Color;
use crate::utils::series::{min_max, MinMax};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::rc::Rc;

fn default_true() -> bool {
    true
}

/// One data series. The sample index is the X position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub name: String,
    pub color: Color,
    pub values: Rc<[f64]>,
    /// Rendered on the main chart and the map.
    #[serde(default = "default_true")]
    pub draw: bool,
    /// Listed in the details popup.
    #[serde(default = "default_true")]
    pub show_in_popup: bool,
}

impl Line {
    pub fn new(name: impl Into<String>, color: Color, values: impl Into<Rc<[f64]>>) -> Self {
        Self {
            name: name.into(),
            color,
            values: values.into(),
            draw: true,
            show_in_popup: true,
        }
    }

    pub fn with_draw(mut self, draw: bool) -> Self {
        self.draw = draw;
        self
    }

    pub fn with_show_in_popup(mut self, show_in_popup: bool) -> Self {
        self.show_in_popup = show_in_popup;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An immutable, shared list of lines.
///
/// Equality is identity: two sets are equal only when they are the same allocation. Replacing the lines
/// means building a new set, which is what invalidates the caches keyed on it.
#[derive(Clone, Debug)]
pub struct LineSet(Rc<[Line]>);

impl LineSet {
    pub fn new(lines: Vec<Line>) -> Self {
        Self(lines.into())
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let lines: Vec<Line> = serde_json::from_str(json)?;
        Ok(Self::new(lines))
    }

    /// The index domain: `[0, max(2, longest line) - 1]`.
    pub fn index_range(&self) -> (f64, f64) {
        let longest = self.0.iter().map(Line::len).max().unwrap_or(0);
        (0.0, (longest.max(2) - 1) as f64)
    }
}

impl Default for LineSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for LineSet {
    type Target = [Line];

    fn deref(&self) -> &[Line] {
        &self.0
    }
}

impl PartialEq for LineSet {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Line>> for LineSet {
    fn from(lines: Vec<Line>) -> Self {
        Self::new(lines)
    }
}

/// Per line min/max, recomputed only for lines whose sample buffer changed.
#[derive(Debug, Default)]
pub struct LinesMinMaxCache {
    last: Option<(LineSet, Vec<Option<MinMax>>)>,
}

impl LinesMinMaxCache {
    pub fn get(&mut self, lines: &LineSet) -> &[Option<MinMax>] {
        let fresh = match &self.last {
            Some((last_lines, _)) if last_lines == lines => None,
            Some((last_lines, last_values)) => Some(
                lines
                    .iter()
                    .enumerate()
                    .map(|(key, line)| match last_lines.get(key) {
                        Some(previous) if Rc::ptr_eq(&previous.values, &line.values) => last_values[key],
                        _ => min_max(&line.values),
                    })
                    .collect(),
            ),
            None => Some(lines.iter().map(|line| min_max(&line.values)).collect()),
        };

        if let Some(values) = fresh {
            self.last = Some((lines.clone(), values));
        }
        match &self.last {
            Some((_, values)) => values,
            None => &[],
        }
    }
}
