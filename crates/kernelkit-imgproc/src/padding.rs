/// How a filter samples coordinates that fall outside the image.
///
/// Filters never pad the image physically. Every out-of-range coordinate of a
/// neighborhood is mapped back inside `[0, len)` before sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// Takes the outermost row or column of pixels and repeats it.
    ///
    /// Example: ...d c b a | a a a a...
    #[default]
    Replicate,

    /// Reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// Reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,

    /// Wraps the content from the opposite side.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl PaddingMode {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        let period = 2 * len as isize;
        let r = i.rem_euclid(period);
        if r < len as isize {
            r as usize
        } else {
            (period - 1 - r) as usize
        }
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len as isize - 2;
        let r = i.rem_euclid(period);
        if r < len as isize {
            r as usize
        } else {
            (period - r) as usize
        }
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the padding mode.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    ///
    /// # Arguments
    ///
    /// * `i` - The (possibly out-of-range) coordinate index.
    /// * `len` - The valid length of the dimension, must be greater than zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Replicate => i.clamp(0, len as isize - 1) as usize,
            PaddingMode::Reflect => Self::reflect(i, len),
            PaddingMode::Reflect101 => Self::reflect101(i, len),
            PaddingMode::Wrap => i.rem_euclid(len as isize) as usize,
        }
    }

    /// Precompute the source index of every tap of a window sliding along one axis.
    ///
    /// The window around position `p` covers `p - radius..=p + radius`. Entry
    /// `p * (2 * radius + 1) + k` of the returned table is the mapped index of tap
    /// `k`, so the inner filter loops never branch on the border.
    ///
    /// # Arguments
    ///
    /// * `len` - The length of the axis, must be greater than zero.
    /// * `radius` - The half size of the window.
    pub fn lookup_table(&self, len: usize, radius: usize) -> Vec<usize> {
        let taps = 2 * radius + 1;
        let mut table = Vec::with_capacity(len * taps);
        for p in 0..len {
            for k in 0..taps {
                let i = p as isize + k as isize - radius as isize;
                table.push(self.map_index(i, len));
            }
        }
        table
    }
}

impl std::fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PaddingMode::Replicate => "replicate",
            PaddingMode::Reflect => "reflect",
            PaddingMode::Reflect101 => "reflect101",
            PaddingMode::Wrap => "wrap",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown padding mode name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown padding mode: {0}")]
pub struct ParsePaddingModeError(String);

impl std::str::FromStr for PaddingMode {
    type Err = ParsePaddingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replicate" => Ok(PaddingMode::Replicate),
            "reflect" => Ok(PaddingMode::Reflect),
            "reflect101" => Ok(PaddingMode::Reflect101),
            "wrap" => Ok(PaddingMode::Wrap),
            _ => Err(ParsePaddingModeError(s.to_string())),
        }
    }
}
