//! HTML entity decoding for display labels.

use std::borrow::Cow;

use phf::phf_map;

static NAMED: phf::Map<&'static str, char> = phf_map! {
    "lt" => '<',
    "gt" => '>',
    "amp" => '&',
    "quot" => '"',
    "apos" => '\'',
    "nbsp" => '\u{a0}',
};

/// Replace `&name;`, `&#NN;` and `&#xNN;` references. Unknown or malformed
/// references are kept verbatim.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match candidate.find(';').and_then(|end| {
            resolve(&candidate[1..end]).map(|ch| (ch, end))
        }) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve(reference: &str) -> Option<char> {
    if let Some(numeric) = reference.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code);
    }
    NAMED.get(reference).copied()
}
