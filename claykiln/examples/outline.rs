use claykiln::{
    CountingSink, Destination, Document, DocumentConfig, FontUsage, KilnError, Name, OutlineEntry, OutlineStyle,
    Real, Rgb,
};
use std::{fs::File, io::BufWriter, path::PathBuf};
use structopt::StructOpt;

/// Write a small PDF with a nested outline.
#[derive(StructOpt, Debug)]
#[structopt(name = "claykiln-outline")]
struct Opt {
    /// Output file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Number of chapters
    #[structopt(short, long, default_value = "3")]
    chapters: usize,

    /// Keep content streams uncompressed
    #[structopt(long)]
    no_compression: bool,
}

fn build(opt: &Opt) -> Result<Document, KilnError> {
    let config = DocumentConfig::default().with_compression(!opt.no_compression);
    let mut doc = Document::new(config);

    let font = doc.new_font();
    if let Some(dict) = doc.object_mut(font).and_then(|f| f.dictionary_mut()) {
        dict.insert("Subtype", Name::from("Type1"));
        dict.insert("BaseFont", Name::from("Helvetica"));
    }
    doc.mark_font_used(font, FontUsage::Simple)?;

    let root = doc.create_outline_root()?;
    for chapter in 1..=opt.chapters {
        let page = doc.add_page(595.0, 842.0);
        doc.use_resource(page, font)?;

        let contents = doc.page_contents(page).ok_or(KilnError::UnknownObject { number: page.number() })?;
        let stream = doc
            .object_mut(contents)
            .ok_or(KilnError::UnknownObject { number: contents.number() })?;
        stream.append_fmt(format_args!(
            "BT /F1 24 Tf {} {} Td (Chapter {}) Tj ET\n",
            Real(72.0),
            Real(770.0),
            chapter
        ))?;
        for section in 1..=3 {
            stream.append_fmt(format_args!(
                "BT /F1 12 Tf {} {} Td (Section {}.{}) Tj ET\n",
                Real(72.0),
                Real(770.0 - 40.0 * section as f64),
                chapter,
                section
            ))?;
        }

        let chapter_entry = doc.add_outline_entry(
            root,
            OutlineEntry::new(format!("Chapter {}", chapter), Destination::new(page, 72.0, 800.0))
                .style(OutlineStyle { italic: false, bold: true })
                .color(Rgb(0, 0, 128))
                .open(chapter == 1),
        )?;
        for section in 1..=3 {
            doc.add_outline_entry(
                chapter_entry,
                OutlineEntry::new(
                    format!("Section {}.{}", chapter, section),
                    Destination::new(page, 72.0, 770.0 - 40.0 * section as f64),
                ),
            )?;
        }
    }
    Ok(doc)
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let mut doc = match build(&opt) {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("Error while building document: {}", e);
            return;
        }
    };

    log::debug!("Write to file");
    let file = File::create(&opt.output).expect("Could not create out file");
    let mut sink = CountingSink::new(BufWriter::new(file));
    if let Err(e) = doc.save(&mut sink) {
        log::error!("Error while writing: {}", e);
    }
}
