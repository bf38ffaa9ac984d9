//! Title, year and episode extraction from release-style file names.

/// Information recovered from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub title: String,
    pub year: Option<u16>,
    pub episode: Option<(u16, u16)>,
}

/// Tokens that mark the end of the title part of a release name
const STOP_TOKENS: &[&str] = &[
    "480p", "576p", "720p", "1080p", "1080i", "2160p", "4k", "uhd", "bluray", "bdrip", "brrip",
    "dvdrip", "webrip", "web-dl", "webdl", "hdtv", "x264", "x265", "h264", "h265", "hevc",
    "remux", "proper", "repack", "extended", "unrated",
];

/// Parse a file stem such as `The.Matrix.1999.1080p` or `Show_Name_S01E02`.
///
/// Parsing stops at the first year, episode marker or release tag. A name
/// that starts with one of those keeps the raw stem as its title.
pub fn parse_file_name(stem: &str) -> ParsedTitle {
    let mut words = Vec::new();
    let mut year = None;
    let mut episode = None;

    for token in tokenize(stem) {
        if let Some(ep) = parse_episode(token) {
            episode = Some(ep);
            break;
        }
        if !words.is_empty() {
            if let Some(y) = parse_year(token) {
                year = Some(y);
                break;
            }
        }
        if STOP_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            break;
        }
        words.push(token);
    }

    let title = if words.is_empty() {
        stem.trim().to_string()
    } else {
        words.join(" ")
    };

    ParsedTitle {
        title,
        year,
        episode,
    }
}

fn tokenize(stem: &str) -> impl Iterator<Item = &str> {
    stem.split(|c: char| matches!(c, '.' | '_' | ' ' | '(' | ')' | '[' | ']'))
        .filter(|t| !t.is_empty())
}

fn parse_year(token: &str) -> Option<u16> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: u16 = token.parse().ok()?;
    (1900..=2099).contains(&year).then_some(year)
}

/// `S01E02` style markers, case-insensitive
fn parse_episode(token: &str) -> Option<(u16, u16)> {
    let lower = token.to_ascii_lowercase();
    let rest = lower.strip_prefix('s')?;
    let (season, episode) = rest.split_once('e')?;
    if season.is_empty() || episode.is_empty() {
        return None;
    }
    Some((season.parse().ok()?, episode.parse().ok()?))
}
