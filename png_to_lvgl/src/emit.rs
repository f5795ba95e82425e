/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Serializes an [`ImageRecord`] as C source. LVGL reads the descriptor
//! struct positionally through its own compiled definition, so the field set
//! and order written by each [`HeaderLayout`] must match that LVGL version
//! exactly.

use std::io::{self, Write};

use crate::format::ColorFormat;
use crate::record::ImageRecord;

const BYTES_PER_LINE: usize = 16;

/// The descriptor shape of one LVGL major version.
pub trait HeaderLayout {
    fn name(&self) -> &'static str;

    /// `lv_img_dsc_t` color format tag, or `None` when this LVGL version has
    /// no way to describe the format.
    fn color_format_tag(&self, format: ColorFormat) -> Option<&'static str>;

    /// Second line of the provenance comment.
    fn banner(&self, format: ColorFormat) -> String;

    fn include(&self) -> &'static str;

    /// Prefix of the per-image attribute macro, completed with the upper-cased identifier.
    fn attribute_prefix(&self) -> &'static str;

    fn write_header_fields(
        &self,
        out: &mut dyn Write,
        record: &ImageRecord,
        cf: &str,
    ) -> io::Result<()>;

    fn supports(&self, format: ColorFormat) -> bool {
        self.color_format_tag(format).is_some()
    }
}

/// LVGL 9 descriptor, as used by the desktop simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lvgl9Layout;

/// LVGL 8 descriptor, as used on the device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lvgl8Layout;

impl HeaderLayout for Lvgl9Layout {
    fn name(&self) -> &'static str {
        "LVGL 9"
    }

    fn color_format_tag(&self, format: ColorFormat) -> Option<&'static str> {
        Some(match format {
            ColorFormat::Argb8888 => "LV_COLOR_FORMAT_ARGB8888",
            ColorFormat::Rgb565 => "LV_COLOR_FORMAT_RGB565",
            ColorFormat::Rgb565A8 => "LV_COLOR_FORMAT_RGB565A8",
        })
    }

    fn banner(&self, format: ColorFormat) -> String {
        format!("{format} format for LVGL 9 simulator")
    }

    fn include(&self) -> &'static str {
        "#include \"lvgl.h\""
    }

    fn attribute_prefix(&self) -> &'static str {
        "LV_ATTRIBUTE_IMAGE_"
    }

    fn write_header_fields(
        &self,
        out: &mut dyn Write,
        record: &ImageRecord,
        cf: &str,
    ) -> io::Result<()> {
        writeln!(out, "    .magic = LV_IMAGE_HEADER_MAGIC,")?;
        writeln!(out, "    .cf = {cf},")?;
        writeln!(out, "    .flags = 0,")?;
        writeln!(out, "    .w = {},", record.width())?;
        writeln!(out, "    .h = {},", record.height())?;
        writeln!(out, "    .stride = {},", record.stride())?;
        writeln!(out, "    .reserved_2 = 0")
    }
}

impl HeaderLayout for Lvgl8Layout {
    fn name(&self) -> &'static str {
        "LVGL 8"
    }

    fn color_format_tag(&self, format: ColorFormat) -> Option<&'static str> {
        match format {
            ColorFormat::Rgb565 => Some("LV_IMG_CF_TRUE_COLOR"),
            ColorFormat::Rgb565A8 => Some("LV_IMG_CF_RGB565A8"),
            // LVGL 8 ties TRUE_COLOR_ALPHA to LV_COLOR_DEPTH, there is no 32-bit tag for a 16-bit build
            ColorFormat::Argb8888 => None,
        }
    }

    fn banner(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Rgb565 => "RGB565 TRUE_COLOR format for LVGL 8 device".to_string(),
            _ => format!("{format} format for LVGL 8 device"),
        }
    }

    fn include(&self) -> &'static str {
        "#include <lvgl.h>"
    }

    fn attribute_prefix(&self) -> &'static str {
        "LV_ATTRIBUTE_IMG_"
    }

    fn write_header_fields(
        &self,
        out: &mut dyn Write,
        record: &ImageRecord,
        cf: &str,
    ) -> io::Result<()> {
        writeln!(out, "    .cf = {cf},")?;
        writeln!(out, "    .always_zero = 0,")?;
        writeln!(out, "    .reserved = 0,")?;
        writeln!(out, "    .w = {},", record.width())?;
        writeln!(out, "    .h = {},", record.height())
    }
}

/// Write `record` as a C byte array `<identifier>_map` and an
/// `lv_img_dsc_t <identifier>` descriptor.
pub fn emit_c_source<W: Write, L: HeaderLayout + ?Sized>(
    out: &mut W,
    record: &ImageRecord,
    layout: &L,
    identifier: &str,
    source_name: &str,
) -> io::Result<()> {
    let format = record.color_format();
    let cf = layout.color_format_tag(format).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{format} has no {} color format tag", layout.name()),
        )
    })?;
    let attribute = format!("{}{}", layout.attribute_prefix(), identifier.to_uppercase());

    writeln!(out, "// Generated from {source_name}")?;
    writeln!(out, "// {}", layout.banner(format))?;
    writeln!(out)?;
    writeln!(out, "{}", layout.include())?;
    writeln!(out)?;

    write_guard(out, "LV_ATTRIBUTE_MEM_ALIGN")?;
    write_guard(out, &attribute)?;

    write!(
        out,
        "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST {attribute} uint8_t {identifier}_map[] = {{\n  "
    )?;
    write_bytes(out, record.data())?;
    write!(out, "\n}};\n\n")?;

    writeln!(out, "const lv_img_dsc_t {identifier} = {{")?;
    writeln!(out, "  .header = {{")?;
    layout.write_header_fields(out, record, cf)?;
    writeln!(out, "  }},")?;
    writeln!(out, "  .data_size = {},", record.data_size())?;
    writeln!(out, "  .data = {identifier}_map,")?;
    writeln!(out, "}};")
}

/// Write only the pixel buffer, for consumers that `include_bytes!` it.
pub fn emit_raw<W: Write>(out: &mut W, record: &ImageRecord) -> io::Result<()> {
    out.write_all(record.data())
}

fn write_guard<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "#ifndef {name}")?;
    writeln!(out, "#define {name}")?;
    writeln!(out, "#endif")?;
    writeln!(out)
}

fn write_bytes<W: Write>(out: &mut W, data: &[u8]) -> io::Result<()> {
    for (i, byte) in data.iter().enumerate() {
        write!(out, "0x{byte:02x}, ")?;
        if (i + 1) % BYTES_PER_LINE == 0 {
            out.write_all(b"\n  ")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::decode::SourceImage;
    use crate::encode::{Argb8888, Rgb565, Rgb565A8};

    fn render<L: HeaderLayout>(record: &ImageRecord, layout: &L, identifier: &str) -> String {
        let mut out = Vec::new();
        emit_c_source(&mut out, record, layout, identifier, "logo.png").unwrap();
        String::from_utf8(out).unwrap()
    }

    fn two_pixels() -> SourceImage {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0x12, 0x34, 0x56, 0xFF])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        SourceImage::new(img, true)
    }

    #[test]
    fn lvgl9_argb8888_artifact() {
        let record = ImageRecord::encode(&Argb8888, &two_pixels());
        let expected = [
            "// Generated from logo.png",
            "// ARGB8888 format for LVGL 9 simulator",
            "",
            "#include \"lvgl.h\"",
            "",
            "#ifndef LV_ATTRIBUTE_MEM_ALIGN",
            "#define LV_ATTRIBUTE_MEM_ALIGN",
            "#endif",
            "",
            "#ifndef LV_ATTRIBUTE_IMAGE_LOGO",
            "#define LV_ATTRIBUTE_IMAGE_LOGO",
            "#endif",
            "",
            "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMAGE_LOGO uint8_t logo_map[] = {",
            "  0x56, 0x34, 0x12, 0xff, 0x00, 0x00, 0x00, 0x00, ",
            "};",
            "",
            "const lv_img_dsc_t logo = {",
            "  .header = {",
            "    .magic = LV_IMAGE_HEADER_MAGIC,",
            "    .cf = LV_COLOR_FORMAT_ARGB8888,",
            "    .flags = 0,",
            "    .w = 2,",
            "    .h = 1,",
            "    .stride = 8,",
            "    .reserved_2 = 0",
            "  },",
            "  .data_size = 8,",
            "  .data = logo_map,",
            "};",
            "",
        ]
        .join("\n");

        assert_eq!(render(&record, &Lvgl9Layout, "logo"), expected);
    }

    #[test]
    fn lvgl8_rgb565_artifact() {
        let record = ImageRecord::encode(&Rgb565, &two_pixels());
        let expected = [
            "// Generated from logo.png",
            "// RGB565 TRUE_COLOR format for LVGL 8 device",
            "",
            "#include <lvgl.h>",
            "",
            "#ifndef LV_ATTRIBUTE_MEM_ALIGN",
            "#define LV_ATTRIBUTE_MEM_ALIGN",
            "#endif",
            "",
            "#ifndef LV_ATTRIBUTE_IMG_FRAME_3965",
            "#define LV_ATTRIBUTE_IMG_FRAME_3965",
            "#endif",
            "",
            "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_FRAME_3965 uint8_t frame_3965_map[] = {",
            "  0xaa, 0x11, 0x00, 0x00, ",
            "};",
            "",
            "const lv_img_dsc_t frame_3965 = {",
            "  .header = {",
            "    .cf = LV_IMG_CF_TRUE_COLOR,",
            "    .always_zero = 0,",
            "    .reserved = 0,",
            "    .w = 2,",
            "    .h = 1,",
            "  },",
            "  .data_size = 4,",
            "  .data = frame_3965_map,",
            "};",
            "",
        ]
        .join("\n");

        assert_eq!(render(&record, &Lvgl8Layout, "frame_3965"), expected);
    }

    #[test]
    fn line_break_after_every_sixteen_bytes() {
        let image = SourceImage::new(RgbaImage::from_pixel(5, 1, Rgba([1, 1, 1, 1])), true);
        let record = ImageRecord::encode(&Argb8888, &image);
        let text = render(&record, &Lvgl9Layout, "dots");

        let body: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.ends_with("dots_map[] = {"))
            .skip(1)
            .take_while(|line| *line != "};")
            .collect();

        assert_eq!(body.len(), 2);
        assert_eq!(body[0], format!("  {}", "0x01, ".repeat(16)));
        assert_eq!(body[1], "  0x01, 0x01, 0x01, 0x01, ");
    }

    #[test]
    fn exact_multiple_of_sixteen_leaves_indent_line() {
        let image = SourceImage::new(RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 0])), true);
        let record = ImageRecord::encode(&Argb8888, &image);
        let text = render(&record, &Lvgl9Layout, "row");

        assert!(text.contains(&format!("  {}\n  \n}};\n", "0x00, ".repeat(16))));
    }

    #[test]
    fn rgb565a8_tags() {
        let record = ImageRecord::encode(&Rgb565A8, &two_pixels());

        let v8 = render(&record, &Lvgl8Layout, "target");
        assert!(v8.contains("    .cf = LV_IMG_CF_RGB565A8,\n"));
        assert!(v8.contains("  .data_size = 6,\n"));

        let v9 = render(&record, &Lvgl9Layout, "target");
        assert!(v9.contains("    .cf = LV_COLOR_FORMAT_RGB565A8,\n"));
        assert!(v9.contains("    .stride = 4,\n"));
    }

    #[test]
    fn lvgl8_cannot_describe_argb8888() {
        assert!(!Lvgl8Layout.supports(ColorFormat::Argb8888));

        let record = ImageRecord::encode(&Argb8888, &two_pixels());
        let mut out = Vec::new();
        let err = emit_c_source(&mut out, &record, &Lvgl8Layout, "logo", "logo.png").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn raw_output_is_just_the_pixel_buffer() {
        let record = ImageRecord::encode(&Argb8888, &two_pixels());
        let mut out = Vec::new();
        emit_raw(&mut out, &record).unwrap();

        assert_eq!(out, [0x56, 0x34, 0x12, 0xFF, 0, 0, 0, 0]);
    }
}
