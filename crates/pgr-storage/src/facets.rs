//! Facet parsing and formatting for store type names
//!
//! A facet is the parenthesized part of a store type name: `varchar(50)`,
//! `numeric(10,2)`, `timestamp(3) with time zone`.

/// Suffixes after which the backend expects facets on the first word
const TIME_ZONE_SUFFIXES: [&str; 2] = [" with time zone", " without time zone"];

/// A store type name split into its base name and numeric facets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStoreType {
    /// The name with the parenthesized facets removed
    pub base: String,
    /// Single facet, read as a length
    pub size: Option<u32>,
    /// Single facet or first of two
    pub precision: Option<u32>,
    /// Second of two facets
    pub scale: Option<u32>,
    /// A facet is all digits but too large to be a facet value
    pub out_of_range: bool,
}

/// Split a store type name into base name and facets
///
/// A single numeric facet is reported as both size and precision; the
/// descriptor it is applied to keeps whichever its family uses. Non-numeric
/// facets (`geometry(Point,4326)`) are stripped from the base but not
/// reported. A digits-only facet that overflows `u32` is not reported either;
/// `out_of_range` is set instead so the name can be rejected.
pub fn parse_store_type(name: &str) -> ParsedStoreType {
    let name = name.trim();
    let (Some(open), Some(close)) = (name.find('('), name.rfind(')')) else {
        return unfaceted(name);
    };
    if close < open {
        return unfaceted(name);
    }

    let base = format!("{}{}", name[..open].trim_end(), &name[close + 1..]);
    let raw: Vec<&str> = name[open + 1..close].split(',').map(str::trim).collect();
    let out_of_range = raw.iter().any(|a| is_digits(a) && a.parse::<u32>().is_err());
    let args: Option<Vec<u32>> = raw.iter().map(|a| a.parse().ok()).collect();

    let (size, precision, scale) = match args.as_deref() {
        Some([n]) => (Some(*n), Some(*n), None),
        Some([p, s]) => (None, Some(*p), Some(*s)),
        _ => (None, None, None),
    };
    ParsedStoreType {
        base,
        size,
        precision,
        scale,
        out_of_range,
    }
}

fn is_digits(arg: &str) -> bool {
    !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit())
}

fn unfaceted(name: &str) -> ParsedStoreType {
    ParsedStoreType {
        base: name.to_string(),
        size: None,
        precision: None,
        scale: None,
        out_of_range: false,
    }
}

/// Strip facets from a store type name
pub fn store_type_base(name: &str) -> String {
    parse_store_type(name).base
}

/// Attach a facet list to a base store type name
///
/// `timestamp with time zone` + `3` gives `timestamp(3) with time zone`; other
/// names get the facets appended.
pub fn with_facet_args(base: &str, args: &str) -> String {
    for suffix in TIME_ZONE_SUFFIXES {
        if let Some(head) = base.strip_suffix(suffix) {
            return format!("{head}({args}){suffix}");
        }
    }
    format!("{base}({args})")
}

#[cfg(test)]
#[path = "facets_test.rs"]
mod tests;
