use crate::helpers;
use leafpress_layout::encoding::to_win_ansi;
use leafpress_layout::FontFace;
use leafpress_render_core::{DrawSurface, Paint, RasterImage, RenderError, TextAnchor};
use leafpress_types::{Color, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::BTreeSet;

#[cfg(feature = "parallel-render")]
use rayon::prelude::*;

const PRODUCER: &str = concat!("leafpress ", env!("CARGO_PKG_VERSION"));

/// Graphics state as last written to the current content stream.
#[derive(Debug, Clone, PartialEq)]
struct GraphicsState {
    fill: Color,
    stroke: Color,
    line_width: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
        }
    }
}

#[derive(Debug, Default)]
struct PageBuffer {
    operations: Vec<Operation>,
    /// Indices into the document-wide font list.
    fonts: BTreeSet<usize>,
    /// Indices into the document-wide image list.
    images: BTreeSet<usize>,
    links: Vec<(Rect, String)>,
    state: GraphicsState,
    drawn: bool,
}

/// An in-memory [`DrawSurface`] that assembles a PDF with `lopdf`.
///
/// Page content is buffered as operations and only turned into objects by
/// [`DrawSurface::finish`], so fonts are numbered (`F1`, `F2`, ...) in order
/// of first use and the output is reproducible byte for byte.
pub struct LopdfCanvas {
    page_size: Size,
    title: String,
    author: String,
    pages: Vec<PageBuffer>,
    current: PageBuffer,
    fonts: Vec<FontFace>,
    images: Vec<RasterImage>,
}

impl LopdfCanvas {
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            title: String::new(),
            author: String::new(),
            pages: Vec::new(),
            current: PageBuffer::default(),
            fonts: Vec::new(),
            images: Vec::new(),
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.current.operations.push(Operation::new(operator, operands));
    }

    fn font_index(&mut self, face: &FontFace) -> usize {
        match self.fonts.iter().position(|known| known == face) {
            Some(index) => index,
            None => {
                self.fonts.push(face.clone());
                self.fonts.len() - 1
            }
        }
    }

    fn paint_path(&mut self, path: Vec<Operation>, paint: Paint) {
        self.current.operations.extend(path);
        self.push(helpers::paint_operator(paint), vec![]);
        self.current.drawn = true;
    }

    fn page_object(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        page: &PageBuffer,
        encoded: Vec<u8>,
        font_ids: &[ObjectId],
        image_ids: &[ObjectId],
    ) -> ObjectId {
        let content_id = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            encoded,
        ));

        let mut font_dict = Dictionary::new();
        for index in &page.fonts {
            font_dict.set(format!("F{}", index + 1), font_ids[*index]);
        }
        let mut resources = dictionary! { "Font" => font_dict };
        if !page.images.is_empty() {
            let mut xobjects = Dictionary::new();
            for index in &page.images {
                xobjects.set(format!("Im{}", index + 1), image_ids[*index]);
            }
            resources.set("XObject", xobjects);
        }

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_size.width.into(), self.page_size.height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        };
        if !page.links.is_empty() {
            let annots: Vec<Object> = page
                .links
                .iter()
                .map(|(rect, url)| doc.add_object(helpers::link_annotation(*rect, url)).into())
                .collect();
            page_dict.set("Annots", annots);
        }
        doc.add_object(page_dict)
    }
}

fn encode_page(page: &PageBuffer) -> Result<Vec<u8>, RenderError> {
    let content = Content {
        operations: page.operations.clone(),
    };
    helpers::deflate(&content.encode()?)
}

impl DrawSurface for LopdfCanvas {
    fn page_size(&self) -> Size {
        self.page_size
    }

    fn set_metadata(&mut self, title: &str, author: &str) {
        self.title = title.to_string();
        self.author = author.to_string();
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.current.state.fill != color {
            self.push("rg", helpers::color_operands(color));
            self.current.state.fill = color;
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        if self.current.state.stroke != color {
            self.push("RG", helpers::color_operands(color));
            self.current.state.stroke = color;
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if self.current.state.line_width != width {
            self.push("w", vec![width.into()]);
            self.current.state.line_width = width;
        }
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &FontFace,
        size: f32,
        anchor: TextAnchor,
    ) {
        if text.is_empty() {
            return;
        }
        let x = match anchor {
            TextAnchor::Left => x,
            TextAnchor::Right => x - font.string_width(text, size),
            TextAnchor::Center => x - font.string_width(text, size) / 2.0,
        };
        let index = self.font_index(font);
        self.current.fonts.insert(index);
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![Object::Name(format!("F{}", index + 1).into_bytes()), size.into()],
        );
        self.push("Td", vec![x.into(), y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
        self.current.drawn = true;
    }

    fn rect(&mut self, rect: Rect, paint: Paint) {
        let path = vec![Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        )];
        self.paint_path(path, paint);
    }

    fn round_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.paint_path(helpers::round_rect_path(rect, radius), paint);
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        self.paint_path(helpers::circle_path(cx, cy, radius), paint);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let path = vec![
            Operation::new("m", vec![x1.into(), y1.into()]),
            Operation::new("l", vec![x2.into(), y2.into()]),
        ];
        self.paint_path(path, Paint::Stroke);
    }

    fn draw_image(&mut self, image: &RasterImage, rect: Rect) {
        let index = match self.images.iter().position(|known| known == image) {
            Some(index) => index,
            None => {
                self.images.push(image.clone());
                self.images.len() - 1
            }
        };
        self.current.images.insert(index);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                rect.y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(format!("Im{}", index + 1).into_bytes())]);
        self.push("Q", vec![]);
        self.current.drawn = true;
    }

    fn link_url(&mut self, rect: Rect, url: &str) {
        self.current.links.push((rect, url.to_string()));
        self.current.drawn = true;
    }

    fn show_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
    }

    fn page_index(&self) -> usize {
        self.pages.len()
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let mut canvas = *self;
        let last = std::mem::take(&mut canvas.current);
        canvas.pages.push(last);
        canvas.pages.retain(|page| page.drawn);

        #[cfg(feature = "parallel-render")]
        let encoded: Vec<Result<Vec<u8>, RenderError>> =
            canvas.pages.par_iter().map(encode_page).collect();
        #[cfg(not(feature = "parallel-render"))]
        let encoded: Vec<Result<Vec<u8>, RenderError>> =
            canvas.pages.iter().map(encode_page).collect();
        let encoded = encoded.into_iter().collect::<Result<Vec<_>, _>>()?;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_ids = canvas
            .fonts
            .iter()
            .map(|face| helpers::add_font(&mut doc, face))
            .collect::<Result<Vec<_>, _>>()?;
        let image_ids = canvas
            .images
            .iter()
            .map(|image| helpers::add_image(&mut doc, image))
            .collect::<Result<Vec<_>, _>>()?;

        let mut kids = Vec::with_capacity(canvas.pages.len());
        for (page, content) in canvas.pages.iter().zip(encoded) {
            let page_id =
                canvas.page_object(&mut doc, pages_id, page, content, &font_ids, &image_ids);
            kids.push(Object::Reference(page_id));
        }
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! { "Producer" => helpers::text_string(PRODUCER) };
        if !canvas.title.is_empty() {
            info.set("Title", helpers::text_string(&canvas.title));
        }
        if !canvas.author.is_empty() {
            info.set("Author", helpers::text_string(&canvas.author));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        log::debug!(
            "Writing PDF: {} pages, {} fonts, {} images",
            count,
            canvas.fonts.len(),
            canvas.images.len()
        );
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafpress_layout::StandardFont;

    fn letter() -> Box<LopdfCanvas> {
        Box::new(LopdfCanvas::new(Size::new(612.0, 792.0)))
    }

    #[test]
    fn empty_canvas_is_a_valid_document() {
        let bytes = letter().finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn blank_trailing_page_is_dropped() {
        let mut canvas = letter();
        canvas.draw_text(72.0, 700.0, "First", &FontFace::HELVETICA, 12.0, TextAnchor::Left);
        canvas.show_page();
        canvas.set_fill_color(Color::WHITE);
        canvas.show_page();
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn text_round_trips_through_extraction() {
        let mut canvas = letter();
        canvas.set_metadata("Guide", "Ada");
        canvas.draw_text(72.0, 700.0, "Hello leafpress", &FontFace::HELVETICA, 12.0, TextAnchor::Left);
        canvas.show_page();
        canvas.draw_text(306.0, 400.0, "Page two", &FontFace::HELVETICA_BOLD, 14.0, TextAnchor::Center);
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(doc.extract_text(&[1]).unwrap().contains("Hello leafpress"));
        assert!(doc.extract_text(&[2]).unwrap().contains("Page two"));
    }

    #[test]
    fn fonts_are_numbered_by_first_use() {
        let mut canvas = letter();
        let courier = FontFace::Standard(StandardFont::Courier);
        canvas.draw_text(10.0, 10.0, "a", &courier, 10.0, TextAnchor::Left);
        canvas.draw_text(10.0, 30.0, "b", &FontFace::HELVETICA, 10.0, TextAnchor::Left);
        canvas.draw_text(10.0, 50.0, "c", &courier, 10.0, TextAnchor::Left);
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let resources = doc.get_dictionary(page_id).unwrap().get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        let base = |key: &[u8]| {
            let id = fonts.get(key).unwrap().as_reference().unwrap();
            doc.get_dictionary(id).unwrap().get(b"BaseFont").unwrap().as_name().unwrap().to_vec()
        };
        assert_eq!(base(b"F1"), b"Courier".to_vec());
        assert_eq!(base(b"F2"), b"Helvetica".to_vec());
    }

    #[test]
    fn output_is_reproducible() {
        let render = || {
            let mut canvas = letter();
            canvas.set_metadata("Same", "Author");
            canvas.set_fill_color(Color::rgb(0x1a, 0x27, 0x44));
            canvas.rect(Rect::new(0.0, 0.0, 612.0, 792.0), Paint::Fill);
            canvas.circle(100.0, 100.0, 13.0, Paint::FillStroke);
            canvas.draw_text(72.0, 700.0, "Stable", &FontFace::HELVETICA, 12.0, TextAnchor::Right);
            canvas.finish().unwrap()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn links_become_uri_annotations() {
        let mut canvas = letter();
        canvas.link_url(Rect::new(72.0, 100.0, 200.0, 20.0), "https://example.com");
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let annots = doc.get_dictionary(page_id).unwrap().get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
        let annot = doc.get_dictionary(annots[0].as_reference().unwrap()).unwrap();
        let action = annot.get(b"A").unwrap().as_dict().unwrap();
        assert_eq!(action.get(b"URI").unwrap().as_str().unwrap(), b"https://example.com");
    }

    #[test]
    fn images_are_embedded_once() {
        let pixels = image::ImageBuffer::from_pixel(3, 2, image::Rgba([0u8, 128, 255, 200]));
        let mut png = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        let raster = RasterImage::from_bytes(png.get_ref()).unwrap();

        let mut canvas = letter();
        canvas.draw_image(&raster, Rect::new(10.0, 10.0, 30.0, 20.0));
        canvas.draw_image(&raster, Rect::new(50.0, 10.0, 30.0, 20.0));
        let doc = Document::load_mem(&canvas.finish().unwrap()).unwrap();
        let images = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_stream().ok())
            .filter(|stream| {
                stream.dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(b"Image".as_slice())
            })
            .count();
        // One colour image plus its soft mask.
        assert_eq!(images, 2);
    }
}
