use std::fmt;
use std::borrow::Cow;
use ahash::AHashSet;
use log::debug;
use regex::bytes::RegexSet;
use serde::{Serialize, Deserialize};

use ro_sequence::Base;
use ro_sequence::NucleotideVec;

use crate::PatternError;
use crate::Rejection;
use crate::SequenceFilter;

/// A site that must not occur in an accepted sequence.
///
/// `Regex` patterns accept the bases A, C, G, T, the IUPAC ambiguity letters,
/// `.` and bracketed classes such as `[AG]`; this is the subset for which a
/// reverse complement is well defined. `Literal` patterns are plain DNA.
///
/// The string form `literal:GAAGAC` selects a literal, `regex:GC.GC` or a
/// bare string selects a regex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForbiddenPattern {
    Literal(String),
    Regex(String),
}

impl From<&str> for ForbiddenPattern {
    fn from(s: &str) -> Self {
        if let Some(lit) = s.strip_prefix("literal:") {
            ForbiddenPattern::Literal(lit.to_string())
        } else if let Some(re) = s.strip_prefix("regex:") {
            ForbiddenPattern::Regex(re.to_string())
        } else {
            ForbiddenPattern::Regex(s.to_string())
        }
    }
}

impl fmt::Display for ForbiddenPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForbiddenPattern::Literal(s) => write!(f, "literal:{}", s),
            ForbiddenPattern::Regex(s) => write!(f, "{}", s),
        }
    }
}

impl ForbiddenPattern {
    pub fn text(&self) -> &str {
        match self {
            ForbiddenPattern::Literal(s) | ForbiddenPattern::Regex(s) => s,
        }
    }

    /// The pattern as handed to the regex engine.
    pub fn regex_source(&self) -> Cow<'_, str> {
        match self {
            ForbiddenPattern::Literal(s) => regex::escape(s).into(),
            ForbiddenPattern::Regex(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Uppercase, validated form of the pattern.
    pub fn canonical(&self) -> Result<ForbiddenPattern, PatternError> {
        match self {
            ForbiddenPattern::Literal(s) => {
                Ok(ForbiddenPattern::Literal(parse_literal(s)?.to_string()))
            }
            ForbiddenPattern::Regex(s) => {
                Ok(ForbiddenPattern::Regex(render(&tokenize(s)?)))
            }
        }
    }

    /// The same site read on the opposite strand.
    pub fn reverse_complement(&self) -> Result<ForbiddenPattern, PatternError> {
        match self {
            ForbiddenPattern::Literal(s) => {
                let rc = parse_literal(s)?.reverse_complement();
                Ok(ForbiddenPattern::Literal(rc.to_string()))
            }
            ForbiddenPattern::Regex(s) => {
                let rc: Vec<BaseSet> = tokenize(s)?.iter()
                    .rev()
                    .map(|t| t.complement())
                    .collect();
                Ok(ForbiddenPattern::Regex(render(&rc)))
            }
        }
    }
}

fn parse_literal(s: &str) -> Result<NucleotideVec, PatternError> {
    if s.is_empty() {
        return Err(PatternError::Empty);
    }
    NucleotideVec::try_from(s)
        .map_err(|e| PatternError::InvalidLiteral(s.to_string(), e))
}

/// Bitmask over `Base::ALL`, one position of a regex pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BaseSet(u8);

impl BaseSet {
    const ANY: BaseSet = BaseSet(0b1111);

    fn of(b: Base) -> Self {
        BaseSet(1 << b as u8)
    }

    fn from_iupac(c: char) -> Option<Self> {
        use Base::*;
        let set = |bases: &[Base]| bases.iter()
            .fold(BaseSet(0), |acc, &b| BaseSet(acc.0 | BaseSet::of(b).0));
        let s = match c.to_ascii_uppercase() {
            'A' => set(&[A]),
            'C' => set(&[C]),
            'G' => set(&[G]),
            'T' => set(&[T]),
            'W' => set(&[A, T]),
            'S' => set(&[C, G]),
            'M' => set(&[A, C]),
            'K' => set(&[G, T]),
            'R' => set(&[A, G]),
            'Y' => set(&[C, T]),
            'B' => set(&[C, G, T]),
            'D' => set(&[A, G, T]),
            'H' => set(&[A, C, T]),
            'V' => set(&[A, C, G]),
            'N' => BaseSet::ANY,
            _ => return None,
        };
        Some(s)
    }

    fn bases(self) -> impl Iterator<Item = Base> {
        Base::ALL.into_iter().filter(move |&b| self.0 & BaseSet::of(b).0 != 0)
    }

    fn complement(self) -> Self {
        self.bases().fold(BaseSet(0), |acc, b| BaseSet(acc.0 | BaseSet::of(b.complement()).0))
    }
}

fn tokenize(pattern: &str) -> Result<Vec<BaseSet>, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    let unsupported = |i: usize| PatternError::NotReverseComplementable(pattern.to_string(), i);

    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '.' => tokens.push(BaseSet::ANY),
            '[' => {
                let mut class = BaseSet(0);
                loop {
                    match chars.next() {
                        Some((_, ']')) if class.0 != 0 => break,
                        Some((j, c)) => {
                            let s = BaseSet::from_iupac(c).ok_or_else(|| unsupported(j))?;
                            class.0 |= s.0;
                        }
                        None => return Err(unsupported(i)),
                    }
                }
                tokens.push(class);
            }
            c => tokens.push(BaseSet::from_iupac(c).ok_or_else(|| unsupported(i))?),
        }
    }
    Ok(tokens)
}

fn render(tokens: &[BaseSet]) -> String {
    let mut s = String::with_capacity(tokens.len());
    for &t in tokens {
        if t == BaseSet::ANY {
            s.push('.');
        } else if t.0.count_ones() == 1 {
            s.extend(t.bases().map(char::from));
        } else {
            s.push('[');
            s.extend(t.bases().map(char::from));
            s.push(']');
        }
    }
    s
}

/// Rejects candidates that contain any forbidden site on either strand.
///
/// The effective set (all canonical patterns, then all reverse complements,
/// duplicates removed) is compiled once into a single regex set.
#[derive(Debug, Clone)]
pub struct ForbiddenSites {
    effective: Vec<ForbiddenPattern>,
    matcher: RegexSet,
}

impl ForbiddenSites {
    pub fn new(patterns: &[ForbiddenPattern]) -> Result<Self, PatternError> {
        let forward = patterns.iter()
            .map(|p| p.canonical())
            .collect::<Result<Vec<_>, _>>()?;
        let reverse = forward.iter()
            .map(|p| p.reverse_complement())
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = AHashSet::new();
        let effective: Vec<ForbiddenPattern> = forward.into_iter()
            .chain(reverse)
            .filter(|p| seen.insert(p.regex_source().into_owned()))
            .collect();

        let matcher = RegexSet::new(effective.iter().map(|p| p.regex_source()))?;
        debug!("Effective forbidden sites: {}", effective.iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>().join(" "));

        Ok(Self { effective, matcher })
    }

    pub fn effective_patterns(&self) -> &[ForbiddenPattern] {
        &self.effective
    }

    /// All effective patterns occurring in `sequence`.
    pub fn matching_patterns(&self, sequence: &[Base]) -> Vec<&ForbiddenPattern> {
        self.matcher.matches(&as_bytes(sequence))
            .into_iter()
            .map(|i| &self.effective[i])
            .collect()
    }
}

impl SequenceFilter for ForbiddenSites {
    fn rejection(&self) -> Rejection {
        Rejection::ForbiddenSite
    }

    fn accepts(&self, sequence: &[Base]) -> bool {
        !self.matcher.is_match(&as_bytes(sequence))
    }
}

fn as_bytes(sequence: &[Base]) -> Vec<u8> {
    sequence.iter().map(|&b| u8::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> NucleotideVec {
        NucleotideVec::try_from(s).unwrap()
    }

    fn sites(patterns: &[&str]) -> ForbiddenSites {
        let patterns: Vec<ForbiddenPattern> = patterns.iter()
            .map(|&p| ForbiddenPattern::from(p))
            .collect();
        ForbiddenSites::new(&patterns).unwrap()
    }

    #[test]
    fn test_pattern_from_str() {
        assert_eq!(ForbiddenPattern::from("GAAGAC"), ForbiddenPattern::Regex("GAAGAC".into()));
        assert_eq!(ForbiddenPattern::from("regex:GC.GC"), ForbiddenPattern::Regex("GC.GC".into()));
        assert_eq!(ForbiddenPattern::from("literal:GAATTC"), ForbiddenPattern::Literal("GAATTC".into()));
        assert_eq!(ForbiddenPattern::Literal("GAATTC".into()).to_string(), "literal:GAATTC");
    }

    #[test]
    fn test_effective_set_adds_reverse_complements() {
        let f = sites(&["GAAGAC"]);
        let texts: Vec<&str> = f.effective_patterns().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["GAAGAC", "GTCTTC"]);

        let f = sites(&["GAAGAC", "GGTCTC", "CACCTCGC"]);
        let texts: Vec<&str> = f.effective_patterns().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["GAAGAC", "GGTCTC", "CACCTCGC", "GTCTTC", "GAGACC", "GCGAGGTG"]);
    }

    #[test]
    fn test_palindromes_are_not_duplicated() {
        let f = sites(&["GAATTC", "gaattc"]);
        assert_eq!(f.effective_patterns().len(), 1);
    }

    #[test]
    fn test_matches_either_strand() {
        let f = sites(&["GAAGAC"]);
        assert!(!f.accepts(&seq("TTGAAGACTT")));
        assert!(!f.accepts(&seq("TTGTCTTCTT")));
        assert!(f.accepts(&seq("TTGAAGTCTT")));
        // at the very ends
        assert!(!f.accepts(&seq("GAAGACTTTT")));
        assert!(!f.accepts(&seq("TTTTGTCTTC")));
    }

    #[test]
    fn test_matching_patterns() {
        let f = sites(&["GAAGAC", "GGTCTC"]);
        let hits = f.matching_patterns(&seq("GAAGACAGAGACC"));
        let hits: Vec<&str> = hits.iter().map(|p| p.text()).collect();
        assert_eq!(hits, vec!["GAAGAC", "GAGACC"]);
        assert!(f.matching_patterns(&seq("ACGTACGT")).is_empty());
    }

    #[test]
    fn test_regex_patterns() {
        // BbvCI-like degenerate site with an N in the middle.
        let f = sites(&["GCNGC"]);
        assert_eq!(f.effective_patterns()[0], ForbiddenPattern::Regex("GC.GC".into()));
        assert!(!f.accepts(&seq("AAGCAGCAA")));
        assert!(!f.accepts(&seq("AAGCTGCAA")));
        assert!(f.accepts(&seq("AAGCAACAA")));

        let f = sites(&["CC[AG]T"]);
        let texts: Vec<&str> = f.effective_patterns().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["CC[AG]T", "A[CT]GG"]);
        assert!(!f.accepts(&seq("TTACGGTT")));
        assert!(!f.accepts(&seq("TTCCGTTT")));
        assert!(f.accepts(&seq("TTCCCTTT")));
    }

    #[test]
    fn test_literal_patterns() {
        let f = ForbiddenSites::new(&[ForbiddenPattern::Literal("ggtctc".into())]).unwrap();
        let texts: Vec<&str> = f.effective_patterns().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["GGTCTC", "GAGACC"]);
        assert!(!f.accepts(&seq("AAGGTCTCAA")));

        let err = ForbiddenSites::new(&[ForbiddenPattern::Literal("GC.GC".into())]).unwrap_err();
        assert!(matches!(err, PatternError::InvalidLiteral(_, _)));
    }

    #[test]
    fn test_invalid_patterns() {
        let err = ForbiddenSites::new(&[ForbiddenPattern::from("")]).unwrap_err();
        assert!(matches!(err, PatternError::Empty));

        let err = ForbiddenSites::new(&[ForbiddenPattern::from("GAA|GAC")]).unwrap_err();
        assert!(matches!(err, PatternError::NotReverseComplementable(_, 3)));

        let err = ForbiddenSites::new(&[ForbiddenPattern::from("GA[AC")]).unwrap_err();
        assert!(matches!(err, PatternError::NotReverseComplementable(_, 2)));

        let err = ForbiddenSites::new(&[ForbiddenPattern::from("GA[]C")]).unwrap_err();
        assert!(matches!(err, PatternError::NotReverseComplementable(_, 3)));
    }

    #[test]
    fn test_no_patterns_accepts_everything() {
        let f = ForbiddenSites::new(&[]).unwrap();
        assert!(f.effective_patterns().is_empty());
        assert!(f.accepts(&seq("GAAGAC")));
    }

    #[test]
    fn test_pattern_serde() {
        let p = vec![
            ForbiddenPattern::Regex("GAAGAC".into()),
            ForbiddenPattern::Literal("GGTCTC".into()),
        ];
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"[{"regex":"GAAGAC"},{"literal":"GGTCTC"}]"#);
        let back: Vec<ForbiddenPattern> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
