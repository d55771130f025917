use crate::{
    error::KilnError,
    object::{IndirectObject, ObjectKind},
    pdf::{
        dict_types, Dictionary, Name, Object, ObjectId, K_COUNT, K_KIDS, K_OUTLINES, K_PAGES, K_PAGE_MODE,
        K_RESOURCES, K_ROOT, K_SIZE,
    },
    resources,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Sink},
};

use super::Document;

/// Comment with bytes above 127, marks the file as binary for transfer tools.
const BINARY_MARKER: &[u8] = b"%\xe2\xe3\xcf\xd3\n";
const FREE_LIST_HEAD: &[u8] = b"0000000000 65535 f \n";

impl Document {
    /// Writes the complete file: header, all objects, cross-reference table
    /// and trailer.
    ///
    /// Adds the catalog and finishes the page tree first, flushes `sink` at
    /// the end. Like [`Document::write_objects`] this can only succeed once.
    pub fn save(&mut self, sink: &mut dyn Sink) -> Result<(), KilnError> {
        let pages_root = self.pages_root.ok_or(KilnError::NoPages)?;
        self.finish_pages(pages_root)?;
        let catalog = self.finish_catalog(pages_root)?;

        log::debug!("assemble document with {} objects", self.len());
        let (major, minor) = self.config().version;
        sink.put(format!("%PDF-{}.{}\n", major, minor).as_bytes())?;
        sink.put(BINARY_MARKER)?;

        let offsets = self.write_objects(sink)?;

        let start_xref = sink.position();
        write_xref(&offsets, sink)?;
        write_trailer(offsets.len() + 1, catalog, start_xref, sink)?;
        sink.flush()
    }

    fn finish_pages(&mut self, pages_root: ObjectId) -> Result<(), KilnError> {
        let mut kids = Vec::with_capacity(self.pages.len());
        for index in 0..self.pages.len() {
            let page = self.pages[index].id;
            let resources = {
                let mut used: Vec<&IndirectObject> = self.pages[index]
                    .resources
                    .iter()
                    .filter_map(|&id| self.object(id))
                    .collect();
                resources::sort(&mut used);
                resources::build(&used, true)
            };
            self.dictionary_mut(page)?.insert(K_RESOURCES, Object::Raw(resources));
            kids.push(Object::Reference(page));
        }

        let count = kids.len() as i64;
        let root = self.dictionary_mut(pages_root)?;
        root.insert(K_KIDS, kids);
        root.insert(K_COUNT, count);
        Ok(())
    }

    fn finish_catalog(&mut self, pages_root: ObjectId) -> Result<ObjectId, KilnError> {
        let catalog = self.new_object(ObjectKind::Dictionary, Some(dict_types::CATALOG));
        let outline_root = self.outline_root;

        let dict = self.dictionary_mut(catalog)?;
        dict.insert(K_PAGES, pages_root);
        if let Some(outlines) = outline_root {
            dict.insert(K_OUTLINES, outlines);
            dict.insert(K_PAGE_MODE, Name::from("UseOutlines"));
        }
        Ok(catalog)
    }
}

fn write_xref(offsets: &[usize], sink: &mut dyn Sink) -> Result<(), KilnError> {
    log::trace!("write XRef");

    sink.put(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes())?;
    sink.put(FREE_LIST_HEAD)?;
    for offset in offsets {
        // every entry is exactly 20 bytes long
        sink.put(format!("{:010} 00000 n \n", offset).as_bytes())?;
    }
    Ok(())
}

fn write_trailer(size: usize, root: ObjectId, start_xref: usize, sink: &mut dyn Sink) -> Result<(), KilnError> {
    log::trace!("write Trailer");

    let trailer: Dictionary = [
        (K_SIZE, Object::Integer(size as i64)),
        (K_ROOT, Object::Reference(root)),
    ]
    .into_iter()
    .collect();
    sink.put(b"trailer\n")?;
    sink.put(&SimpleEncoder::encode(&trailer))?;
    sink.put(format!("\nstartxref\n{}\n%%EOF\n", start_xref).as_bytes())
}
