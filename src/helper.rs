use crate::barcode::{Bar, Barcode};
use crate::error::{BarcodeError, Result};

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Markup templates ----*/

// Each template is written out twice: once with its fields (for `writeln!`) and once with the fields
// removed (for `svg_len`). The two must stay in sync.
const SVG_OPEN_FIXED: &str =
	"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"\" height=\"\" version=\"1.1\">\n";
const RECT_FIXED: &str =
	"  <rect x=\"\" y=\"0\" width=\"\" height=\"\" style=\"fill:\"/>\n";
const SVG_CLOSE: &str = "</svg>\n";

/// Colours used when rendering a barcode.
///
/// Any SVG paint value made of ASCII letters, digits, `#`, `(`, `)`, `,`, `.`, `%` and spaces is
/// accepted, e.g. `"white"`, `"#1a1a1a"` or `"rgb(0, 0, 0)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgOptions {
	/// Fill of the full-canvas background rectangle.
	pub background: String,
	/// Fill of every bar.
	pub foreground: String,
}

impl Default for SvgOptions {
	fn default() -> Self {
		Self {
			background: "white".to_string(),
			foreground: "black".to_string(),
		}
	}
}

impl SvgOptions {
	fn check(&self) -> Result<()> {
		for (name, value) in [("background", &self.background), ("foreground", &self.foreground)] {
			let valid = !value.is_empty()
				&& value.chars().all(|c| c.is_ascii_alphanumeric() || "#(),.% ".contains(c));
			if !valid {
				return Err(BarcodeError::InvalidParameter { name, value: value.clone() });
			}
		}
		Ok(())
	}
}

/*---- Rendering ----*/

/// Returns the exact length in bytes of the markup [`render_svg`] produces for these inputs.
pub fn svg_len(width: u64, height: u32, bars: &[Bar], options: &SvgOptions) -> usize {
	let h = decimal_len(u64::from(height));
	let open = SVG_OPEN_FIXED.len() + decimal_len(width) + h;
	let background = RECT_FIXED.len() + 1 + decimal_len(width) + h + options.background.len();
	let rects: usize = bars
		.iter()
		.map(|bar| {
			RECT_FIXED.len() + decimal_len(bar.x) + decimal_len(bar.width) + h + options.foreground.len()
		})
		.sum();
	open + background + rects + SVG_CLOSE.len()
}

/// Renders a canvas and its bars as SVG.
///
/// Emits the root element, one background rectangle covering the whole canvas, then one rectangle
/// per bar at `y="0"` spanning the full height. The output is allocated once at its exact length.
/// The string always uses Unix newlines (\n), regardless of the platform.
///
/// # Errors
///
/// Returns [`BarcodeError::InvalidParameter`] if a colour in `options` is not a plain paint value,
/// and [`BarcodeError::AllocationFailure`] if the output buffer cannot be reserved.
pub fn render_svg(width: u64, height: u32, bars: &[Bar], options: &SvgOptions) -> Result<String> {
	options.check()?;
	let len = svg_len(width, height, bars, options);
	let mut result = String::new();
	result.try_reserve_exact(len).map_err(|_| BarcodeError::AllocationFailure)?;
	write_svg(&mut result, width, height, bars, options).map_err(|_| BarcodeError::AllocationFailure)?;
	debug_assert_eq!(result.len(), len);
	result.shrink_to_fit();
	Ok(result)
}

fn write_svg(out: &mut String, width: u64, height: u32, bars: &[Bar], options: &SvgOptions) -> std::fmt::Result {
	writeln!(out, "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" version=\"1.1\">")?;
	write_rect(out, 0, width, height, &options.background)?;
	for bar in bars {
		write_rect(out, bar.x, bar.width, height, &options.foreground)?;
	}
	out.push_str(SVG_CLOSE);
	Ok(())
}

fn write_rect(out: &mut String, x: u64, width: u64, height: u32, fill: &str) -> std::fmt::Result {
	writeln!(out, "  <rect x=\"{x}\" y=\"0\" width=\"{width}\" height=\"{height}\" style=\"fill:{fill}\"/>")
}

fn decimal_len(n: u64) -> usize {
	n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Returns a string of SVG code for an image depicting the given barcode.
///
/// # Example
///
/// ```rust
/// use barcos::barcode::Barcode;
/// use barcos::helper::{to_svg_string, SvgOptions};
///
/// let barcode = Barcode::encode_code39("", 1, 10).unwrap();
/// let options = SvgOptions { background: "#fff".into(), foreground: "navy".into() };
/// let svg = to_svg_string(&barcode, &options).unwrap();
/// assert!(svg.contains("style=\"fill:navy\""));
/// ```
pub fn to_svg_string(barcode: &Barcode, options: &SvgOptions) -> Result<String> {
	render_svg(barcode.width(), barcode.height(), barcode.bars(), options)
}

/*---- Files ----*/

/// Writes SVG markup to a file, overwriting any existing file of the same name.
///
/// # Arguments
///
/// * `svg` - The markup to write.
/// * `directory_path` - Optional. The directory the file is written to. If not provided, the default directory is "generated".
/// * `filename` - Optional. The file name; `.svg` is appended if missing. If not provided, a timestamp-based filename will be used.
///
/// # Returns
///
/// The path of the written file.
///
/// # Example
///
/// ```rust
/// use barcos::barcode::generate_nw7_svg;
/// use barcos::helper::save_svg;
///
/// let svg = generate_nw7_svg("1234", 'A', 'A', 2, 100).unwrap();
/// let path = save_svg(&svg, Some("target/doc-barcodes"), Some("barcode")).unwrap();
/// assert!(path.ends_with("barcode.svg"));
/// ```
pub fn save_svg(svg: &str, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
	let directory_path = directory_path.unwrap_or("generated");
	let filename = match filename {
		Some(name) if name.ends_with(".svg") => name.to_string(),
		Some(name) => format!("{}.svg", name),
		None => {
			let since_the_epoch = SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.map(|d| d.as_millis())
				.unwrap_or_default();
			format!("{}.svg", since_the_epoch)
		}
	};

	let directory = Path::new(directory_path);
	if !directory.exists() {
		fs::create_dir_all(directory)?;
	}

	let file_path = directory.join(filename);
	fs::write(&file_path, svg)?;
	tracing::debug!(path = %file_path.display(), bytes = svg.len(), "saved barcode");
	Ok(file_path)
}

/// Renders a barcode with default colours and writes it to a file. See [`save_svg`].
pub fn barcode_to_svg_and_save(barcode: &Barcode, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
	let svg = barcode.to_svg_string()?;
	save_svg(&svg, directory_path, filename)
}
