use std::path::{Path, PathBuf};

use html_escape::decode_html_entities;
use log::{debug, warn};

use crate::config::AssetsConfig;
use crate::domain::Location;

/// Outcome of resolving a location's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Loaded {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    Placeholder {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    Missing,
}

impl ImageStatus {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Loaded { path, .. } | Self::Placeholder { path, .. } => Some(path),
            Self::Missing => None,
        }
    }

    pub const fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Self::Loaded { width, height, .. } | Self::Placeholder { width, height, .. } => {
                Some((*width, *height))
            }
            Self::Missing => None,
        }
    }
}

/// A link collected from the description, numbered from 1 in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Read-only content of the detail overlay for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub name: String,
    pub image: ImageStatus,
    /// Image size once scaled to fit the configured box
    pub display_size: Option<(u32, u32)>,
    pub lines: Vec<String>,
    pub links: Vec<Link>,
}

impl DetailView {
    pub fn build(location: &Location, assets: &AssetsConfig) -> Self {
        let image = resolve_image(&location.image, assets);
        let display_size = image
            .dimensions()
            .map(|size| fit_within(size, assets.detail_image_size));
        let (lines, links) = html_to_text(&location.description);

        Self {
            name: location.name.clone(),
            image,
            display_size,
            lines,
            links,
        }
    }

    /// Link for a digit key (`1` is the first link).
    pub fn link(&self, number: usize) -> Option<&Link> {
        number.checked_sub(1).and_then(|index| self.links.get(index))
    }
}

/// Finds the image for `image`, falling back to the placeholder.
pub fn resolve_image(image: &str, assets: &AssetsConfig) -> ImageStatus {
    let candidate = Path::new(image);
    let candidate = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        assets.img_dir.join(candidate)
    };

    match image::image_dimensions(&candidate) {
        Ok((width, height)) if !image.is_empty() => {
            return ImageStatus::Loaded {
                path: candidate,
                width,
                height,
            }
        }
        Ok(_) => {}
        Err(e) => debug!("Image {} unreadable: {e}", candidate.display()),
    }

    let placeholder = assets.placeholder_path();
    match image::image_dimensions(&placeholder) {
        Ok((width, height)) => ImageStatus::Placeholder {
            path: placeholder,
            width,
            height,
        },
        Err(e) => {
            warn!("Placeholder image {} unreadable: {e}", placeholder.display());
            ImageStatus::Missing
        }
    }
}

/// Scales `size` to the largest size fitting in `bounds` with the same
/// aspect ratio.
pub fn fit_within(size: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = size;
    let (max_width, max_height) = bounds;
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = (f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Converts a description fragment into plain text lines and its links.
///
/// Block tags (`p`, `br`, `li`, `div`, headings) break lines, links are
/// followed by their number in brackets and entities are decoded.
pub fn html_to_text(html: &str) -> (Vec<String>, Vec<Link>) {
    let mut text = String::new();
    let mut links = Vec::new();
    let mut open_link: Option<(String, String)> = None;
    let mut rest = html;
    let mut from = 0;

    while let Some(offset) = rest[from..].find('<') {
        let start = from + offset;
        if !opens_tag(&rest[start + 1..]) {
            from = start + 1;
            continue;
        }
        from = 0;
        push_text(&mut text, &mut open_link, &rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            push_text(&mut text, &mut open_link, &rest[start..]);
            rest = "";
            break;
        };
        let tag = &rest[start + 1..start + end];
        rest = &rest[start + end + 1..];

        let (closing, name) = tag
            .strip_prefix('/')
            .map_or((false, tag), |stripped| (true, stripped));
        let name = name
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match (name.as_str(), closing) {
            ("a", false) => {
                if let Some(href) = attribute(tag, "href") {
                    open_link = Some((href, String::new()));
                }
            }
            ("a", true) => {
                if let Some((href, label)) = open_link.take() {
                    links.push(Link {
                        label: collapse_spaces(&label),
                        href,
                    });
                    text.push_str(&format!(" [{}]", links.len()));
                }
            }
            ("br", _) => text.push('\n'),
            ("li", false) => text.push_str("\n\u{2022} "),
            ("p" | "div" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4", _) => text.push('\n'),
            _ => {}
        }
    }
    push_text(&mut text, &mut open_link, rest);

    let lines = text
        .lines()
        .map(collapse_spaces)
        .filter(|line| !line.is_empty())
        .collect();
    (lines, links)
}

/// A `<` only starts a tag when followed by a letter, `/` or `!`.
fn opens_tag(after: &str) -> bool {
    after
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn push_text(text: &mut String, open_link: &mut Option<(String, String)>, raw: &str) {
    let decoded = decode_entities(&raw.replace(['\n', '\r', '\t'], " "));
    if let Some((_, label)) = open_link {
        label.push_str(&decoded);
    }
    text.push_str(&decoded);
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let needle = format!("{name}=");
    let at = lower
        .match_indices(&needle)
        .map(|(at, _)| at)
        .find(|&at| lower[..at].ends_with(char::is_whitespace))?;
    let value = tag[at + name.len() + 1..].trim_start();
    let value = match value.chars().next()? {
        quote @ ('"' | '\'') => value[1..].split(quote).next()?,
        _ => value.split(char::is_whitespace).next()?,
    };
    Some(decode_entities(value))
}

fn decode_entities(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) -> Result<(), Box<dyn std::error::Error>> {
        image::RgbImage::new(width, height).save(path)?;
        Ok(())
    }

    fn location(image: &str, description: &str) -> Location {
        Location::new(
            "Ribera del Duero",
            Coordinates::new(41.63, -3.69),
            description,
            image,
        )
    }

    fn assets_in(dir: &Path) -> AssetsConfig {
        AssetsConfig {
            img_dir: dir.to_path_buf(),
            ..AssetsConfig::default()
        }
    }

    #[test]
    fn fits_keeping_aspect_ratio() {
        assert_eq!(fit_within((1200, 400), (600, 320)), (600, 200));
        assert_eq!(fit_within((400, 800), (600, 320)), (160, 320));
        assert_eq!(fit_within((60, 32), (600, 320)), (600, 320));
        assert_eq!(fit_within((0, 10), (600, 320)), (0, 0));
    }

    #[test]
    fn loads_image_from_image_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        write_png(&dir.path().join("ribera.png"), 120, 40)?;

        let view = DetailView::build(&location("ribera.png", ""), &assets_in(dir.path()));
        assert!(matches!(view.image, ImageStatus::Loaded { width: 120, height: 40, .. }));
        assert_eq!(view.display_size, Some((600, 200)));
        Ok(())
    }

    #[test]
    fn absolute_image_path_is_used_as_is() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let other = tempdir()?;
        let path = other.path().join("abs.png");
        write_png(&path, 10, 10)?;

        let image = path.display().to_string();
        let status = resolve_image(&image, &assets_in(dir.path()));
        assert_eq!(status.path(), Some(path.as_path()));
        Ok(())
    }

    #[test]
    fn falls_back_to_placeholder_then_missing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let assets = assets_in(dir.path());

        assert_eq!(resolve_image("absent.png", &assets), ImageStatus::Missing);

        write_png(&assets.placeholder_path(), 30, 20)?;
        let status = resolve_image("absent.png", &assets);
        assert!(matches!(status, ImageStatus::Placeholder { width: 30, .. }));

        std::fs::write(dir.path().join("broken.png"), b"not an image")?;
        let status = resolve_image("broken.png", &assets);
        assert!(matches!(status, ImageStatus::Placeholder { .. }));
        Ok(())
    }

    #[test]
    fn missing_image_has_no_display_size() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let view = DetailView::build(&location("", "text"), &assets_in(dir.path()));
        assert_eq!(view.image, ImageStatus::Missing);
        assert_eq!(view.display_size, None);
        Ok(())
    }

    #[test]
    fn converts_description_to_lines_and_links() {
        let html = "<p>Tempranillo &amp; Garnacha.</p>\n<p>See <a href=\"https://riberadelduero.es\">the \
                    council</a> or <a href='https://example.org/?a=1&amp;b=2'>more</a>.</p>\
                    <ul><li>Roble</li><li>Crianza</li></ul>";
        let (lines, links) = html_to_text(html);

        assert_eq!(
            lines,
            vec![
                "Tempranillo & Garnacha.",
                "See the council [1] or more [2].",
                "\u{2022} Roble",
                "\u{2022} Crianza",
            ]
        );
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "the council");
        assert_eq!(links[0].href, "https://riberadelduero.es");
        assert_eq!(links[1].href, "https://example.org/?a=1&b=2");
    }

    #[test]
    fn plain_text_description_is_kept() {
        let (lines, links) = html_to_text("Just text, 3 < 4");
        assert_eq!(lines, vec!["Just text, 3 < 4"]);
        assert!(links.is_empty());
    }

    #[test]
    fn links_are_numbered_from_one() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let view = DetailView::build(
            &location("", "<a href=\"https://do.es\">DO</a>"),
            &assets_in(dir.path()),
        );
        assert_eq!(view.link(1).map(|l| l.href.as_str()), Some("https://do.es"));
        assert!(view.link(0).is_none());
        assert!(view.link(2).is_none());
        Ok(())
    }

    #[test]
    fn numeric_and_named_entities_are_decoded() {
        let (lines, _) = html_to_text("Denominaci&#243;n de origen &eacute;&nbsp;calificada");
        assert_eq!(lines, vec!["Denominación de origen é calificada"]);
    }

    #[test]
    fn stray_angle_brackets_stay_in_the_text() {
        let (lines, _) = html_to_text("Alcohol 3 < 4 grados y 5 > 2 años");
        assert_eq!(lines, vec!["Alcohol 3 < 4 grados y 5 > 2 años"]);

        let (lines, _) = html_to_text("<p>1 <2</p><p>Fin</p>");
        assert_eq!(lines, vec!["1 <2", "Fin"]);
    }

    #[test]
    fn href_is_not_read_from_prefixed_attributes() {
        let (_, links) =
            html_to_text("<a data-href=\"x\" href=\"https://real.es\">DO</a>");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "https://real.es");
    }
}
