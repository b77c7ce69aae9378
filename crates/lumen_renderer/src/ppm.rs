//! Plain-text PPM (`P3`) output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::renderer::{color_to_rgb, ImageBuffer};

/// Write `image` as a `P3` PPM: header, then one line per scanline with
/// gamma-corrected channel values separated by spaces.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    let mut line = String::new();
    for y in 0..image.height {
        line.clear();
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb(image.get(x, y));
            if x > 0 {
                line.push(' ');
            }
            line.push_str(&format!("{r} {g} {b}"));
        }
        writeln!(writer, "{line}")?;
    }

    Ok(())
}

/// Save `image` to a PPM file.
pub fn save_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 0.0));
        image.set(1, 1, Color::new(0.0, 0.0, 1.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 2\n255\n255 255 255 127 0 0\n0 0 0 0 0 255\n");
    }

    #[test]
    fn test_save_ppm() {
        let path = std::env::temp_dir().join(format!("lumen_test_{}.ppm", std::process::id()));
        let image = ImageBuffer::new(3, 1);

        save_ppm(&image, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text, "P3\n3 1\n255\n0 0 0 0 0 0 0 0 0\n");
    }
}
