pub(super) struct PathParts {
    pub dir: String,
    pub base: String,
    pub stem: String,
    pub ext: Option<String>,
    pub segments: Vec<String>,
}

/// `scheme://` with an RFC 3986 scheme (letter, then letters/digits/`+-.`).
pub(super) fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Lowercase + IDNA/Punycode.
pub(super) fn canonical_host(host: &str) -> String {
    let lower = host.to_ascii_lowercase();
    idna::domain_to_ascii(&lower).unwrap_or(lower)
}

/// Percent-decode one URL path component; invalid UTF-8 is replaced.
pub(super) fn decode(component: &str) -> String {
    percent_encoding::percent_decode_str(component)
        .decode_utf8_lossy()
        .into_owned()
}

pub(super) fn split_path(path: &str, separators: &[char]) -> PathParts {
    let is_sep = |c: char| separators.contains(&c);

    let (head, base) = match path.rfind(is_sep) {
        Some(idx) => {
            let sep_len = path[idx..].chars().next().map_or(1, char::len_utf8);
            (&path[..idx], &path[idx + sep_len..])
        }
        None => ("", path),
    };

    let dir = match head.trim_end_matches(is_sep) {
        "" if path.starts_with(is_sep) => path[..1].to_string(),
        trimmed => trimmed.to_string(),
    };

    let (stem, ext) = split_ext(base);

    PathParts {
        dir,
        base: base.to_string(),
        stem,
        ext,
        segments: path
            .split(is_sep)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Dotfiles and names ending in `.` have no extension.
fn split_ext(base: &str) -> (String, Option<String>) {
    match base.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < base.len() => {
            (base[..idx].to_string(), Some(base[idx + 1..].to_string()))
        }
        _ => (base.to_string(), None),
    }
}
