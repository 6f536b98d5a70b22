//! The PARAMS vector identification ruleset.
//!
//! Most summary keywords need additional data before the corresponding
//! column means anything: well keywords (WOPR, WWCT) need a WGNAMES entry,
//! completions need a well name and a NUMS cell number, local-grid keywords
//! need LGRS and the NUMLX/NUMLY/NUMLZ coordinates. The rules live here as
//! one pure function over the keyword name.

/// A specifier vector that can contribute to qualifying a summary keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Wgnames,
    Nums,
    Lgrs,
    Numlx,
    Numly,
    Numlz,
}

impl Qualifier {
    /// The 8-byte space-padded specifier keyword, as it appears in a
    /// specification file.
    pub fn keyword(self) -> &'static str {
        match self {
            Qualifier::Wgnames => "WGNAMES ",
            Qualifier::Nums => "NUMS    ",
            Qualifier::Lgrs => "LGRS    ",
            Qualifier::Numlx => "NUMLX   ",
            Qualifier::Numly => "NUMLY   ",
            Qualifier::Numlz => "NUMLZ   ",
        }
    }
}

impl std::fmt::Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.keyword().trim_end())
    }
}

/// Every specifier that can make [`identifies`] return non-zero, in the
/// order their values are appended to a qualified column name.
pub fn partial_identifiers() -> &'static [Qualifier] {
    &[
        Qualifier::Wgnames,
        Qualifier::Nums,
        Qualifier::Lgrs,
        Qualifier::Numlx,
        Qualifier::Numly,
        Qualifier::Numlz,
    ]
}

/// Does `qualifier` contribute to identifying the vector named `keyword`?
///
/// Returns 0 when it does not. When it does, the returned value is the
/// total number of qualifiers the keyword needs to be fully specified, so
/// callers can iterate [`partial_identifiers`] and stop once the vector is
/// complete. Every positive return for a given keyword agrees on that
/// total.
///
/// `keyword` is compared as the 8-byte space-padded name; shorter input is
/// treated as if right-padded with spaces.
pub fn identifies(qualifier: Qualifier, keyword: &str) -> u32 {
    use Qualifier::*;

    let key = padded(keyword);
    let bytes = key.as_bytes();

    match bytes[0] {
        // Aquifer, block and region data are cell-numbered.
        b'A' | b'B' | b'R' => matches_any(qualifier, &[Nums], 1),

        // Completions need both the well and the cell.
        b'C' => matches_any(qualifier, &[Wgnames, Nums], 2),

        // Group and well data, minus the reserved {F,G,W}M* mnemonics and
        // WNEWTON, which are not parametrised at all.
        b'G' | b'W' => {
            if bytes[1] == b'M' || key == "WNEWTON " {
                return 0;
            }
            matches_any(qualifier, &[Wgnames], 1)
        }

        b'P' => matches_any(qualifier, &[Wgnames], 1),

        // Local-grid data splits on the second character.
        b'L' => match bytes[1] {
            b'B' => matches_any(qualifier, &[Lgrs, Numlx, Numly, Numlz], 4),
            b'C' => matches_any(qualifier, &[Lgrs, Wgnames, Numlx, Numly, Numlz], 4),
            b'W' => matches_any(qualifier, &[Lgrs, Wgnames], 2),
            _ => 0,
        },

        b'N' => match key.as_str() {
            "NEWTON  " | "NAIMFRAC" | "NLINEARS" | "NLINSMIN" | "NLINSMAX" => 0,
            _ => matches_any(qualifier, &[Wgnames], 1),
        },

        b'S' => {
            if key == "STEPTYPE" {
                return 0;
            }
            match &bytes[..4] {
                b"SGAS" | b"SOIL" | b"SWAT" => 0,
                _ => matches_any(qualifier, &[Wgnames, Nums], 2),
            }
        }

        _ => 0,
    }
}

fn matches_any(qualifier: Qualifier, accepted: &[Qualifier], total: u32) -> u32 {
    if accepted.contains(&qualifier) {
        total
    } else {
        0
    }
}

/// Right-pad a keyword to the 8-byte on-disk form.
fn padded(keyword: &str) -> String {
    format!("{:<8}", keyword)
}
