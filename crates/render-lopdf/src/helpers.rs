//! Builders for the PDF objects a canvas emits: path operators, font
//! dictionaries, image XObjects and link annotations.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use leafpress_layout::{FontFace, TrueTypeFace};
use leafpress_render_core::{ImageData, Paint, RasterImage, RenderError};
use leafpress_types::{Color, Rect};
use lopdf::content::Operation;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;

/// Control point distance for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

pub(crate) fn color_operands(color: Color) -> Vec<Object> {
    color.to_unit_rgb().into_iter().map(Object::Real).collect()
}

pub(crate) fn paint_operator(paint: Paint) -> &'static str {
    match paint {
        Paint::Fill => "f",
        Paint::Stroke => "S",
        Paint::FillStroke => "B",
    }
}

fn curve(ops: &mut Vec<Operation>, points: [f32; 6]) {
    ops.push(Operation::new(
        "c",
        points.into_iter().map(Object::Real).collect(),
    ));
}

/// Path operators for a rectangle with rounded corners.
pub(crate) fn round_rect_path(rect: Rect, radius: f32) -> Vec<Operation> {
    let r = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.top());
    let mut ops = vec![Operation::new("m", vec![(x0 + r).into(), y0.into()])];
    ops.push(Operation::new("l", vec![(x1 - r).into(), y0.into()]));
    curve(&mut ops, [x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r]);
    ops.push(Operation::new("l", vec![x1.into(), (y1 - r).into()]));
    curve(&mut ops, [x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1]);
    ops.push(Operation::new("l", vec![(x0 + r).into(), y1.into()]));
    curve(&mut ops, [x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r]);
    ops.push(Operation::new("l", vec![x0.into(), (y0 + r).into()]));
    curve(&mut ops, [x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0]);
    ops.push(Operation::new("h", vec![]));
    ops
}

/// Path operators for a full circle.
pub(crate) fn circle_path(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = r * KAPPA;
    let mut ops = vec![Operation::new("m", vec![(cx + r).into(), cy.into()])];
    curve(&mut ops, [cx + r, cy + k, cx + k, cy + r, cx, cy + r]);
    curve(&mut ops, [cx - k, cy + r, cx - r, cy + k, cx - r, cy]);
    curve(&mut ops, [cx - r, cy - k, cx - k, cy - r, cx, cy - r]);
    curve(&mut ops, [cx + k, cy - r, cx + r, cy - k, cx + r, cy]);
    ops.push(Operation::new("h", vec![]));
    ops
}

/// A PDF text string: literal for ASCII, UTF-16BE with a byte order mark otherwise.
pub(crate) fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

/// Adds the font dictionary (and for TrueType, its descriptor and program).
pub(crate) fn add_font(doc: &mut Document, face: &FontFace) -> Result<ObjectId, RenderError> {
    match face {
        FontFace::Standard(font) => Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        })),
        FontFace::TrueType(face) => add_truetype_font(doc, face),
    }
}

fn add_truetype_font(doc: &mut Document, face: &TrueTypeFace) -> Result<ObjectId, RenderError> {
    let program = Stream::new(
        dictionary! {
            "Length1" => face.data.len() as i64,
            "Filter" => "FlateDecode",
        },
        deflate(&face.data)?,
    );
    let program_id = doc.add_object(program);

    // Nonsymbolic, plus Italic when the face says so.
    let flags: i64 = if face.italic { 32 | 64 } else { 32 };
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(face.postscript_name.clone().into_bytes()),
        "Flags" => flags,
        "FontBBox" => face.bbox.iter().map(|v| Object::Integer(*v as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => 0,
        "Ascent" => face.ascent as i64,
        "Descent" => face.descent as i64,
        "CapHeight" => face.cap_height as i64,
        "StemV" => 80,
        "FontFile2" => program_id,
    });

    let widths: Vec<Object> = face.widths[32..=255]
        .iter()
        .map(|w| Object::Integer(*w as i64))
        .collect();
    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => Object::Name(face.postscript_name.clone().into_bytes()),
        "FirstChar" => 32,
        "LastChar" => 255,
        "Widths" => widths,
        "FontDescriptor" => descriptor_id,
        "Encoding" => "WinAnsiEncoding",
    }))
}

/// Adds an image XObject, with an alpha soft mask when the image has one.
pub(crate) fn add_image(doc: &mut Document, image: &RasterImage) -> Result<ObjectId, RenderError> {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    let content = match &image.data {
        ImageData::Jpeg(bytes) => {
            dict.set("Filter", "DCTDecode");
            bytes.clone()
        }
        ImageData::Rgb { rgb, alpha } => {
            if let Some(alpha) = alpha {
                let mask = Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => image.width as i64,
                        "Height" => image.height as i64,
                        "ColorSpace" => "DeviceGray",
                        "BitsPerComponent" => 8,
                        "Filter" => "FlateDecode",
                    },
                    deflate(alpha)?,
                );
                let mask_id = doc.add_object(mask);
                dict.set("SMask", mask_id);
            }
            dict.set("Filter", "FlateDecode");
            deflate(rgb)?
        }
    };
    Ok(doc.add_object(Stream::new(dict, content)))
}

/// A borderless link annotation opening `url`.
pub(crate) fn link_annotation(rect: Rect, url: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![rect.x.into(), rect.y.into(), rect.right().into(), rect.top().into()],
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::String(url.as_bytes().to_vec(), StringFormat::Literal),
        },
    }
}
