//! Stateless post-processing of routine replies.
//!
//! Consumes the assistant bridge's output and produces a structured form the
//! rendering surface can style: numbered steps, bullets, tip headers, and
//! inline spans for bold product names and frequency/timing phrases. The
//! pattern tables cover every supported locale, applied as a union the same
//! way the filters compose for display.

use once_cell::sync::Lazy;
use regex::Regex;

/// An inline fragment of a routine line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    /// A `**bold**` span, typically a product name.
    Bold(String),
    /// A frequency phrase ("twice daily", "hebdomadaire", ...).
    Frequency(String),
    /// A timing phrase ("before bed", "le matin", ...).
    Timing(String),
}

/// One display block of the formatted routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A numbered step.
    Step { number: u32, spans: Vec<Span> },
    /// A bulleted line.
    Bullet(Vec<Span>),
    /// A tips/notes heading.
    TipHeader(String),
    /// Any other non-empty line.
    Paragraph(Vec<Span>),
}

static STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)[.)]\s+(.*)$").unwrap());

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[•·\-]\s+(.*)$").unwrap());

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

// Section headers are dropped entirely: steps carry their own timing, so the
// headers would duplicate information the step text already has.
static SECTION_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Morning Routine:|Evening Routine:|AM Routine:|PM Routine:|روتين الصباح:|روتين المساء:|שגרת בוקר:|שגרת ערב:|Routine du Matin:|Routine du Soir:|Rutina de la Mañana:|Rutina de la Noche:)",
    )
    .unwrap()
});

static TIP_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*\**\s*(Tips?:|Notes?:|Important:|Remember:|Additional Tips:|نصائح:|نصائح إضافية:|ملاحظات:|טיפים:|טיפים נוספים:|הערות:|Conseils:|Conseils Supplémentaires:|Consejos:|Consejos Adicionales:)\s*\**\s*$",
    )
    .unwrap()
});

static FREQUENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Twice daily|Once daily|Daily|Weekly|2-3 times per week|Every other day|يومياً|مرتين يومياً|أسبوعياً|פעמיים ביום|פעם ביום|יומי|שבועי|Deux fois par jour|Une fois par jour|Quotidien|Hebdomadaire|Dos veces al día|Una vez al día|Diario|Semanal)",
    )
    .unwrap()
});

static TIMING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(before bed|after cleansing|wait 20 minutes|in the morning|at night|قبل النوم|بعد التنظيف|في الصباح|في الليل|לפני השינה|אחרי הניקוי|בבוקר|בלילה|avant le coucher|après le nettoyage|le matin|le soir|antes de dormir|después de limpiar|por la mañana|por la noche)",
    )
    .unwrap()
});

/// Formats a routine reply into display blocks.
pub fn format_routine(content: &str) -> Vec<Block> {
    let cleaned = SECTION_HEADER_RE.replace_all(content, "");

    let mut blocks = Vec::new();
    for line in cleaned.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if TIP_HEADER_RE.is_match(line) {
            let heading = line.trim_matches('*').trim().to_string();
            blocks.push(Block::TipHeader(heading));
            continue;
        }

        if let Some(caps) = STEP_RE.captures(line) {
            let number: u32 = caps[1].parse().unwrap_or(0);
            blocks.push(Block::Step {
                number,
                spans: parse_spans(&caps[2]),
            });
            continue;
        }

        if let Some(caps) = BULLET_RE.captures(line) {
            blocks.push(Block::Bullet(parse_spans(&caps[1])));
            continue;
        }

        blocks.push(Block::Paragraph(parse_spans(line)));
    }

    blocks
}

/// Splits a line into bold/frequency/timing/plain spans.
fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in BOLD_RE.captures_iter(line) {
        let whole = caps.get(0).unwrap();
        if whole.start() > cursor {
            highlight_phrases(&line[cursor..whole.start()], &mut spans);
        }
        spans.push(Span::Bold(caps[1].to_string()));
        cursor = whole.end();
    }
    if cursor < line.len() {
        highlight_phrases(&line[cursor..], &mut spans);
    }

    spans
}

/// Marks frequency and timing phrases within a plain segment.
fn highlight_phrases(segment: &str, spans: &mut Vec<Span>) {
    let mut cursor = 0;

    // One merged pass keeps the output ordered left to right.
    let mut matches: Vec<(usize, usize, bool)> = FREQUENCY_RE
        .find_iter(segment)
        .map(|m| (m.start(), m.end(), true))
        .chain(
            TIMING_RE
                .find_iter(segment)
                .map(|m| (m.start(), m.end(), false)),
        )
        .collect();
    matches.sort_by_key(|(start, _, _)| *start);

    for (start, end, is_frequency) in matches {
        if start < cursor {
            continue;
        }
        if start > cursor {
            push_plain(&segment[cursor..start], spans);
        }
        let text = segment[start..end].to_string();
        spans.push(if is_frequency {
            Span::Frequency(text)
        } else {
            Span::Timing(text)
        });
        cursor = end;
    }

    if cursor < segment.len() {
        push_plain(&segment[cursor..], spans);
    }
}

fn push_plain(text: &str, spans: &mut Vec<Span>) {
    if !text.is_empty() {
        spans.push(Span::Plain(text.to_string()));
    }
}
