//! Resource dictionaries for content streams.

use crate::{
    object::{Extension, IndirectObject},
    pdf::{ObjectId, ResourceCategory, ResourceCode},
};

const PROC_SET_TEXT: &str = "/ProcSet [/PDF/Text]";
const PROC_SET_FULL: &str = "/ProcSet [/PDF/Text/ImageB/ImageC/ImageI]";

/// How a content stream uses a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontUsage {
    /// Single byte encoded text shown through the font itself.
    Simple,
    /// Text shown through the glyph-index companion font.
    GlyphIndex,
}

/// Font specific state of a font resource object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontResource {
    pub(crate) simple_used: bool,
    pub(crate) glyph_index_used: bool,
    pub(crate) companion: Option<(ResourceCode, ObjectId)>,
}

impl FontResource {
    pub(crate) fn mark(&mut self, usage: FontUsage) {
        match usage {
            FontUsage::Simple => self.simple_used = true,
            FontUsage::GlyphIndex => self.glyph_index_used = true,
        }
    }

    pub fn simple_used(&self) -> bool {
        self.simple_used
    }

    pub fn glyph_index_used(&self) -> bool {
        self.glyph_index_used
    }

    pub fn companion(&self) -> Option<(&ResourceCode, ObjectId)> {
        self.companion.as_ref().map(|(code, id)| (code, *id))
    }
}

/// Sorts resources so that each category forms one consecutive run.
pub fn sort(resources: &mut [&IndirectObject]) {
    resources.sort_by(|a, b| a.compare(b));
}

/// Builds the resource dictionary for `resources`, which must be sorted.
///
/// Objects without a resource code are skipped.
pub fn build(resources: &[&IndirectObject], include_proc_set: bool) -> String {
    if resources.is_empty() {
        return if include_proc_set {
            format!("<<{}>>", PROC_SET_TEXT)
        } else {
            "<<>>".to_owned()
        };
    }

    let mut out = String::from("<<");
    if include_proc_set {
        out.push_str(PROC_SET_FULL);
    }

    let mut current: Option<ResourceCategory> = None;
    for object in resources {
        let code = match object.resource_code() {
            Some(code) => code,
            None => {
                log::warn!("object {} is used as resource but has no resource code", object.number());
                continue;
            }
        };

        let category = code.category();
        if current != Some(category) {
            if current.is_some() {
                out.push_str(">>");
            }
            out.push('/');
            out.push_str(category.key());
            out.push_str(" <<");
            current = Some(category);
        }

        match &object.extension {
            Extension::Font(font) => {
                if font.simple_used {
                    push_reference(&mut out, code, object.id());
                }
                if font.glyph_index_used {
                    if let Some((companion_code, companion)) = &font.companion {
                        push_reference(&mut out, companion_code, *companion);
                    }
                }
            }
            _ => push_reference(&mut out, code, object.id()),
        }
    }

    if current.is_some() {
        out.push_str(">>");
    }
    out.push_str(">>");
    out
}

fn push_reference(out: &mut String, code: &ResourceCode, id: ObjectId) {
    out.push_str(&format!("{} {}", code, id));
}
