//! Handles parsing of various free-form inputs.
//!
//! Every grammar here is built from `combine` parsers and run over a
//! position-tracking stream, so failures report the line and column at
//! which input stopped making sense. Callers only see the crate `Error`.

use combine::parser::char::{char, digit, spaces};
use combine::stream::easy;
use combine::stream::position::{self, SourcePosition};
use combine::{
    attempt, between, choice, count_min_max, eof, many, many1, optional, satisfy, satisfy_map,
    sep_by, skip_many1, EasyParser, ParseError, Parser, Stream,
};

use crate::dictionary::SetClass;
use crate::error::{Error, Result};
use crate::pitch::PitchClass;
use crate::set::{IntervalVector, PcSet};

/// The stream every grammar in this module is run against.
type LineStream<'a> = easy::Stream<position::Stream<&'a str, SourcePosition>>;

/// Parses a single alphanumeric pitch-class digit.
///
/// ```text
/// PcDigit : [0-9] | 'A' | 'a' | 'B' | 'b'
///         ;
/// ```
fn pitch_class<Input>() -> impl Parser<Input, Output = PitchClass>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    satisfy_map(PitchClass::from_char).expected("pitch class [0-9AB]")
}

/// Parses a run of pitch-class digits such as `0258AB`.
///
/// ```text
/// PcString : PcDigit+
///          ;
/// ```
fn pitch_class_string<Input>() -> impl Parser<Input, Output = PcSet>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    many1(pitch_class()).map(|pcs: Vec<PitchClass>| PcSet::from(pcs))
}

/// Parses one interval-class count of an interval vector.
///
/// Counts run up to 12 (the aggregate holds twelve of each of the first five
/// interval classes), so `C` is accepted here but not in a `PcDigit`.
///
/// ```text
/// Count : [0-9] | [Aa] | [Bb] | [Cc]
///       ;
/// ```
fn interval_count<Input>() -> impl Parser<Input, Output = u8>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    satisfy_map(|c: char| match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A' | 'a' => Some(10),
        'B' | 'b' => Some(11),
        'C' | 'c' => Some(12),
        _ => None,
    })
    .expected("interval count [0-9ABC]")
}

/// ```text
/// IntervalVector : Count Count Count Count Count Count
///                ;
/// ```
fn interval_vector<Input>() -> impl Parser<Input, Output = IntervalVector>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    count_min_max(6, 6, interval_count()).map(|counts: Vec<u8>| {
        let mut vector = [0u8; 6];
        vector.copy_from_slice(&counts);
        IntervalVector::new(vector)
    })
}

/// Parses a row of the set-class reference table.
///
/// ```text
/// Field : [^\t]*
///       ;
///
/// Row : Field '\t' PcString '\t' IntervalVector '\t' Field
///     ;
/// ```
fn reference_row<Input>() -> impl Parser<Input, Output = SetClass>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    let field = || many::<String, _, _>(satisfy(|c: char| c != '\t'));
    let tab = || char('\t').expected("tab separator");

    (
        many1::<String, _, _>(satisfy(|c: char| c != '\t')).expected("set-class name"),
        tab(),
        pitch_class_string(),
        tab(),
        interval_vector(),
        tab(),
        field(),
        eof(),
    )
        .map(|(name, _, set, _, interval_vector, _, description, _)| SetClass {
            name,
            set,
            interval_vector,
            description,
        })
}

/// Parses an unsigned decimal integer, saturating rather than overflowing.
fn integer<Input>() -> impl Parser<Input, Output = i64>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    many1(digit()).map(|digits: String| {
        digits
            .bytes()
            .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')))
    })
}

/// Parses a set literal in any of the spellings accepted on the command line
/// and in job files.
///
/// A bare run of digits without separators is read as compact pitch-class
/// digits, so `10` is `[1, 0]` while `[10]` and `10 11` hold pitch class 10.
///
/// ```text
/// Bracketed : '[' (Integer (',' Integer)*)? ']'
///           ;
///
/// Separated : Integer ([, \t]+ Integer)+
///           ;
///
/// SetLiteral : Bracketed | Separated | PcString
///            ;
/// ```
fn set_literal<Input>() -> impl Parser<Input, Output = Vec<i64>>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    let bracketed = between(
        char('[').skip(spaces()),
        char(']'),
        sep_by::<Vec<i64>, _, _, _>(integer().skip(spaces()), char(',').skip(spaces())),
    );

    let separator = || skip_many1(satisfy(|c: char| c == ',' || c.is_whitespace()));
    let separated = (integer(), many1::<Vec<i64>, _, _>(attempt(separator().with(integer()))))
        .map(|(first, rest)| {
            let mut values = vec![first];
            values.extend(rest);
            values
        });

    let compact = many1(pitch_class()).map(|pcs: Vec<PitchClass>| {
        pcs.into_iter().map(|pc| pc.to_int() as i64).collect::<Vec<i64>>()
    });

    spaces()
        .with(choice((attempt(bracketed), attempt(separated), compact)))
        .skip(spaces())
        .skip(eof())
}

/// A single pitch line of a Scala tuning file, before conversion.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ScalaPitch {
    /// Literal text of a cents value such as `-3.5` or `701.955`.
    Cents(String),
    /// A frequency ratio; a bare integer `n` is `n/1`.
    Ratio(i64, i64),
}

/// Parses the pitch at the start of a Scala line. Anything after it is a
/// free-text annotation and is left unread.
///
/// ```text
/// Cents : '-'? [0-9]+ '.' [0-9]*
///       ;
///
/// Ratio : Integer ('/' Integer)?
///       ;
///
/// ScalaPitch : Cents | Ratio
///            ;
/// ```
fn scala_pitch<Input>() -> impl Parser<Input, Output = ScalaPitch>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<char, Input::Range, Input::Position>,
{
    let cents = (
        optional(char('-')),
        many1::<String, _, _>(digit()),
        char('.'),
        many::<String, _, _>(digit()),
    )
        .map(|(sign, whole, _, fraction)| {
            let sign = if sign.is_some() { "-" } else { "" };
            ScalaPitch::Cents(format!("{}{}.{}", sign, whole, fraction))
        });

    let ratio = (integer(), optional(char('/').with(integer())))
        .map(|(numerator, denominator)| ScalaPitch::Ratio(numerator, denominator.unwrap_or(1)));

    spaces().with(choice((attempt(cents), ratio)))
}

/// Flatten a `combine` error report onto one line.
fn describe(errors: easy::Errors<char, &str, SourcePosition>) -> String {
    errors
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse compact alphanumeric pitch-class digits, e.g. `"0258AB"`.
pub(crate) fn parse_alpha_set(input: &str) -> Result<PcSet> {
    pitch_class_string::<LineStream>()
        .skip(eof())
        .easy_parse(position::Stream::new(input))
        .map(|(set, _)| set)
        .map_err(|errors| Error::Syntax {
            input: input.to_string(),
            reason: describe(errors),
        })
}

/// Parse any set literal spelling, validating that each member is a pitch
/// class.
pub(crate) fn parse_set_literal(input: &str) -> Result<PcSet> {
    let (values, _) = set_literal::<LineStream>()
        .easy_parse(position::Stream::new(input))
        .map_err(|errors| Error::Syntax {
            input: input.to_string(),
            reason: describe(errors),
        })?;

    values
        .into_iter()
        .map(|value| {
            usize::try_from(value)
                .ok()
                .and_then(PitchClass::from_int)
                .ok_or(Error::InvalidPitchClass { value })
        })
        .collect()
}

/// Parse one line of the reference table. The error is a human-readable
/// reason; the caller knows the line number.
pub(crate) fn parse_reference_row(line: &str) -> std::result::Result<SetClass, String> {
    reference_row::<LineStream>()
        .easy_parse(position::Stream::new(line))
        .map(|(row, _)| row)
        .map_err(describe)
}

/// Parse the pitch at the start of a Scala line.
pub(crate) fn parse_scala_pitch(line: &str) -> std::result::Result<ScalaPitch, String> {
    scala_pitch::<LineStream>()
        .easy_parse(position::Stream::new(line))
        .map(|(pitch, _)| pitch)
        .map_err(describe)
}
