//! Serialize laid-out pages into a PDF file with lopdf

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::RenderError;
use crate::layout::text::Font;
use crate::layout::{Canvas, WATERMARK_GSTATE, WATERMARK_XOBJECT};
use crate::watermark::WatermarkImage;

/// Document info written to the /Info dictionary
#[derive(Debug, Clone, Copy)]
pub struct DocumentInfo<'a> {
    pub title: &'a str,
    pub subject: &'a str,
    pub creator: &'a str,
}

/// Write every page of `canvas` into a standalone PDF
pub fn write_pdf(canvas: Canvas<'_>, info: DocumentInfo<'_>) -> Result<Vec<u8>, RenderError> {
    let geometry = *canvas.geometry();
    let watermark = canvas.watermark().map(|stamp| (stamp.image, stamp.opacity));

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let mut resources = dictionary! {
        "Font" => Object::Dictionary(fonts),
    };
    if let Some((image, opacity)) = watermark {
        let image_id = add_image(&mut doc, image)?;
        let gstate_id = doc.add_object(dictionary! {
            "Type" => "ExtGState",
            "ca" => Object::Real(opacity),
            "CA" => Object::Real(opacity),
        });
        resources.set(
            "XObject",
            dictionary! { WATERMARK_XOBJECT => Object::Reference(image_id) },
        );
        resources.set(
            "ExtGState",
            dictionary! { WATERMARK_GSTATE => Object::Reference(gstate_id) },
        );
    }
    let resources_id = doc.add_object(resources);

    let media_box = vec![
        0.into(),
        0.into(),
        Object::Real(geometry.width_pt()),
        Object::Real(geometry.height_pt()),
    ];

    let mut kids: Vec<Object> = Vec::new();
    for page in canvas.into_pages() {
        let content = Content {
            operations: page.into_operations(),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(format!("Failed to encode content: {e}")))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box.clone(),
            "Resources" => Object::Reference(resources_id),
            "Contents" => Object::Reference(content_id),
        });
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

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(info.title),
        "Subject" => Object::string_literal(info.subject),
        "Creator" => Object::string_literal(info.creator),
        "Producer" => Object::string_literal("society-pdf"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RenderError::Pdf(format!("Failed to save PDF: {e}")))?;
    Ok(output)
}

/// Embed the watermark as a DeviceRGB image, alpha as its soft mask
fn add_image(doc: &mut Document, image: &WatermarkImage) -> Result<ObjectId, RenderError> {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(image.width()),
        "Height" => i64::from(image.height()),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    if let Some(alpha) = image.compressed_alpha()? {
        let mask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width()),
                "Height" => i64::from(image.height()),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            alpha,
        )
        .with_compression(false);
        let mask_id = doc.add_object(mask);
        dict.set("SMask", Object::Reference(mask_id));
    }
    let stream = Stream::new(dict, image.compressed_rgb()?).with_compression(false);
    Ok(doc.add_object(stream))
}
