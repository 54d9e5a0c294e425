use xmltree::Element;

use crate::core::shared::{DecodeOutcome, Vec3, Warning};
use super::xml::{self, Ns};

/// Tuple width assumed when a source has no accessor or no usable stride.
pub(crate) const DEFAULT_STRIDE: usize = 3;

/// A named flat numeric array viewed as a sequence of `stride`-wide tuples.
/// Trailing values that do not fill a complete tuple are discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    stride: usize,
    values: Vec<f32>,
}

impl Source {
    pub(crate) fn empty(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
            values: Vec::new(),
        }
    }

    pub(crate) fn from_values(stride: usize, mut values: Vec<f32>) -> Self {
        let stride = stride.max(1);
        values.truncate(values.len() - values.len() % stride);
        Self { stride, values }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of complete tuples.
    pub fn len(&self) -> usize {
        self.values.len() / self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn tuple(&self, index: usize) -> Option<&[f32]> {
        if index < self.len() {
            Some(&self.values[index * self.stride..][..self.stride])
        } else {
            None
        }
    }

    /// The rows as 3-component points. Empty when the stride is too narrow
    /// to carry a point; wider tuples keep their first three components.
    pub(crate) fn rows3(&self) -> Vec<Vec3> {
        if self.stride < 3 {
            return Vec::new();
        }
        (0..self.len())
            .map(|i| {
                let t = &self.values[i * self.stride..];
                [t[0], t[1], t[2]]
            })
            .collect()
    }
}

/// Decodes one `<source>` element: whitespace-separated `<float_array>`
/// text cut into tuples of the accessor stride. Never fails the import; a
/// missing or unparsable array yields an empty source, the latter with a
/// warning.
pub(crate) fn decode_source(source_el: &Element, ns: &Ns, id: &str) -> DecodeOutcome<Source> {
    let stride = accessor_stride(source_el, ns);

    let text = match xml::child(source_el, ns, "float_array").and_then(Element::get_text) {
        Some(text) => text,
        None => return DecodeOutcome::Complete(Source::empty(stride)),
    };

    let mut values = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<f32>() {
            Ok(value) => values.push(value),
            // one bad token poisons the whole array
            Err(_) => {
                return DecodeOutcome::Partial(
                    Source::empty(stride),
                    vec![Warning::UnparsableFloatArray {
                        source: id.to_owned(),
                    }],
                );
            }
        }
    }

    DecodeOutcome::Complete(Source::from_values(stride, values))
}

fn accessor_stride(source_el: &Element, ns: &Ns) -> usize {
    xml::child(source_el, ns, "technique_common")
        .and_then(|tc| xml::child(tc, ns, "accessor"))
        .and_then(|acc| acc.attributes.get("stride"))
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&s| s >= 1)
        .unwrap_or(DEFAULT_STRIDE)
}
