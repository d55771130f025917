use fnv::FnvHashMap;

use crate::{
    error::KilnError,
    object::{Encryptor, Extension, IndirectObject, ObjectKind},
    pdf::{
        dict_types, Dictionary, Object, ObjectId, ResourceCategory, ResourceCode, K_CONTENTS, K_MEDIA_BOX, K_PARENT,
    },
    resources::{FontResource, FontUsage},
    writer::Sink,
};

mod assemble;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    /// Compress stream objects. Turning this off keeps content streams
    /// readable for debugging.
    pub compress: bool,
    /// Factor from user units to points.
    pub scale: f64,
    pub version: (u8, u8),
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            compress: true,
            scale: 1.0,
            version: (1, 4),
        }
    }
}

impl DocumentConfig {
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_version(mut self, major: u8, minor: u8) -> Self {
        self.version = (major, minor);
        self
    }
}

#[derive(Debug)]
struct Page {
    id: ObjectId,
    contents: ObjectId,
    resources: Vec<ObjectId>,
}

/// Owner of all indirect objects of one output file.
///
/// Objects are numbered in creation order and written in that order.
pub struct Document {
    config: DocumentConfig,
    objects: Vec<IndirectObject>,
    encryptor: Option<Box<dyn Encryptor>>,
    resource_ordinals: FnvHashMap<ResourceCategory, u32>,
    pub(crate) outline_root: Option<ObjectId>,
    pages_root: Option<ObjectId>,
    pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}

impl Document {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            objects: Vec::new(),
            encryptor: None,
            resource_ordinals: FnvHashMap::default(),
            outline_root: None,
            pages_root: None,
            pages: Vec::new(),
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn set_encryptor(&mut self, encryptor: impl Encryptor + 'static) {
        self.encryptor = Some(Box::new(encryptor));
    }

    pub(crate) fn register(
        &mut self,
        kind: ObjectKind,
        type_tag: Option<&str>,
        code: Option<ResourceCode>,
        extension: Extension,
    ) -> ObjectId {
        let id = ObjectId::from_index(self.objects.len());
        let mut object = IndirectObject::new(id, kind, type_tag, !self.config.compress);
        if let Some(code) = code {
            object.set_resource_code(code);
        }
        object.extension = extension;
        self.objects.push(object);
        id
    }

    pub fn new_object(&mut self, kind: ObjectKind, type_tag: Option<&str>) -> ObjectId {
        self.register(kind, type_tag, None, Extension::Plain)
    }

    /// Creates an object that content streams refer to by a resource code.
    pub fn new_resource(&mut self, kind: ObjectKind, type_tag: Option<&str>, category: ResourceCategory) -> ObjectId {
        let code = self.next_code(category);
        self.register(kind, type_tag, Some(code), Extension::Plain)
    }

    pub fn new_font(&mut self) -> ObjectId {
        let code = self.next_code(ResourceCategory::Font);
        self.register(
            ObjectKind::Dictionary,
            Some(dict_types::FONT),
            Some(code),
            Extension::Font(FontResource::default()),
        )
    }

    /// Creates the glyph-index companion of `font`.
    ///
    /// The companion gets its own font resource code, but is referenced from
    /// resource dictionaries through `font` only.
    pub fn add_glyph_index_companion(&mut self, font: ObjectId) -> Result<ObjectId, KilnError> {
        self.font_mut(font)?;
        let code = self.next_code(ResourceCategory::Font);
        let companion = self.new_object(ObjectKind::Dictionary, Some(dict_types::FONT));
        self.font_mut(font)?.companion = Some((code, companion));
        Ok(companion)
    }

    pub fn mark_font_used(&mut self, font: ObjectId, usage: FontUsage) -> Result<(), KilnError> {
        self.font_mut(font)?.mark(usage);
        Ok(())
    }

    pub fn font(&self, font: ObjectId) -> Option<&FontResource> {
        match &self.object(font)?.extension {
            Extension::Font(resource) => Some(resource),
            _ => None,
        }
    }

    fn font_mut(&mut self, font: ObjectId) -> Result<&mut FontResource, KilnError> {
        let number = font.number();
        match &mut self.get_mut(font)?.extension {
            Extension::Font(resource) => Ok(resource),
            _ => Err(KilnError::NotAFont { number }),
        }
    }

    fn next_code(&mut self, category: ResourceCategory) -> ResourceCode {
        let ordinal = self.resource_ordinals.entry(category).or_insert(0);
        *ordinal += 1;
        ResourceCode::new(category, *ordinal)
    }

    pub fn object(&self, id: ObjectId) -> Option<&IndirectObject> {
        self.objects.get(id.index())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut IndirectObject> {
        self.objects.get_mut(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Result<&mut IndirectObject, KilnError> {
        self.object_mut(id).ok_or(KilnError::UnknownObject { number: id.number() })
    }

    pub(crate) fn dictionary_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary, KilnError> {
        let number = id.number();
        let object = self.get_mut(id)?;
        if object.is_written() {
            return Err(KilnError::AlreadyWritten { number });
        }
        object.dictionary_mut().ok_or(KilnError::NoPayload { number })
    }

    /// All objects in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &IndirectObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Adds a page of the given size in user units and returns its id.
    pub fn add_page(&mut self, width: f64, height: f64) -> ObjectId {
        let pages_root = match self.pages_root {
            Some(id) => id,
            None => {
                let id = self.new_object(ObjectKind::Dictionary, Some(dict_types::PAGES));
                self.pages_root = Some(id);
                id
            }
        };

        let id = self.new_object(ObjectKind::Dictionary, Some(dict_types::PAGE));
        let contents = self.new_object(ObjectKind::Stream, None);
        let scale = self.config.scale;
        if let Some(dict) = self.objects[id.index()].dictionary_mut() {
            dict.insert(K_PARENT, pages_root);
            dict.insert(
                K_MEDIA_BOX,
                vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width * scale),
                    Object::Real(height * scale),
                ],
            );
            dict.insert(K_CONTENTS, contents);
        }

        self.pages.push(Page {
            id,
            contents,
            resources: Vec::new(),
        });
        log::debug!("added page {} ({} x {})", id.number(), width, height);
        id
    }

    pub fn pages(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.pages.iter().map(|page| page.id)
    }

    /// Content stream object of `page`.
    pub fn page_contents(&self, page: ObjectId) -> Option<ObjectId> {
        self.pages.iter().find(|p| p.id == page).map(|p| p.contents)
    }

    /// Records `resource` as used by the content stream of `page`.
    pub fn use_resource(&mut self, page: ObjectId, resource: ObjectId) -> Result<(), KilnError> {
        if self.object(resource).is_none() {
            return Err(KilnError::UnknownObject {
                number: resource.number(),
            });
        }
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == page)
            .ok_or(KilnError::UnknownObject { number: page.number() })?;
        if !page.resources.contains(&resource) {
            page.resources.push(resource);
        }
        Ok(())
    }

    /// Writes every object in registration order and returns their offsets.
    ///
    /// This is the bare finalization pass, [`Document::save`] wraps it with
    /// header, cross-reference table and trailer. Any error leaves `sink` in
    /// an unusable state.
    pub fn write_objects(&mut self, sink: &mut dyn Sink) -> Result<Vec<usize>, KilnError> {
        let encryptor = self.encryptor.as_deref();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for object in self.objects.iter_mut() {
            offsets.push(sink.position());
            object.write_record(sink, encryptor)?;
        }
        log::debug!("wrote {} objects", offsets.len());
        Ok(offsets)
    }
}
