//! Path data (`d` attribute) parsing and command replay.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// One path command: its code letter and the numbers that followed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCommand {
    pub code: char,
    pub args: Vec<f64>,
}

impl PathCommand {
    pub fn new(code: char, args: Vec<f64>) -> Self {
        Self { code, args }
    }

    /// Number of arguments the command consumes, `None` for unsupported codes.
    pub fn arity(&self) -> Option<usize> {
        match self.code {
            'M' | 'L' => Some(2),
            'C' => Some(6),
            'Q' => Some(4),
            'Z' => Some(0),
            _ => None,
        }
    }

    /// The arguments the command consumes, if enough finite values are present.
    fn operands(&self) -> Option<&[f64]> {
        let arity = self.arity()?;
        let operands = self.args.get(..arity)?;
        operands.iter().all(|v| v.is_finite()).then_some(operands)
    }
}

/// Split path data into commands.
///
/// Every letter other than `e`/`E` starts a new command; the numbers up to
/// the next command letter become its arguments. Numbers before the first
/// command are dropped. Codes are kept verbatim, so unsupported or relative
/// commands survive parsing and are skipped at replay.
pub fn parse_path_data(data: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<PathCommand> = None;
    let bytes = data.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_alphabetic() && b != b'e' && b != b'E' {
            if let Some(cmd) = current.take() {
                commands.push(cmd);
            }
            current = Some(PathCommand::new(b as char, Vec::new()));
            pos += 1;
            continue;
        }
        if b.is_ascii_whitespace() || b == b',' {
            pos += 1;
            continue;
        }
        match scan_number(data, pos) {
            Some((value, next)) => {
                if let Some(cmd) = current.as_mut() {
                    cmd.args.push(value);
                }
                pos = next;
            }
            None => {
                // Stray byte (an exponent marker without digits, a lone sign,
                // non-ASCII). Record it as NaN so the command is rejected.
                if let Some(cmd) = current.as_mut() {
                    cmd.args.push(f64::NAN);
                }
                pos += data[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if let Some(cmd) = current {
        commands.push(cmd);
    }
    commands
}

/// Scan one number starting at `pos`: optional sign, digits with an optional
/// fraction, optional exponent.
pub(crate) fn scan_number(source: &str, pos: usize) -> Option<(f64, usize)> {
    let bytes = source.as_bytes();
    let mut end = pos;
    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits |= frac_end > frac_start;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    source[pos..end].parse().ok().map(|v| (v, end))
}

/// Replay commands into a Bézier path.
///
/// Commands with missing or non-finite operands are skipped, as are
/// unsupported codes. A drawing command with no open subpath starts one at
/// its first point, and a command following `Z` resumes from the closed
/// subpath's start.
pub fn replay(commands: &[PathCommand]) -> BezPath {
    let mut path = BezPath::new();
    let mut subpath_start: Option<Point> = None;
    let mut closed = false;

    for cmd in commands {
        let Some(ops) = cmd.operands() else {
            log::debug!("Skipping path command {:?} with args {:?}", cmd.code, cmd.args);
            continue;
        };
        let point = |i: usize| Point::new(ops[i], ops[i + 1]);

        match cmd.code {
            'M' => {
                let p = point(0);
                path.move_to(p);
                subpath_start = Some(p);
                closed = false;
                continue;
            }
            'Z' => {
                if subpath_start.is_some() && !closed {
                    path.close_path();
                    closed = true;
                }
                continue;
            }
            _ => {}
        }

        // Drawing command: make sure there is a current point.
        match subpath_start {
            None => {
                let p = point(0);
                path.move_to(p);
                subpath_start = Some(p);
            }
            Some(start) if closed => path.move_to(start),
            Some(_) => {}
        }
        closed = false;

        match cmd.code {
            'L' => path.line_to(point(0)),
            'C' => path.curve_to(point(0), point(2), point(4)),
            'Q' => path.quad_to(point(0), point(2)),
            _ => unreachable!("arity() only admits M, L, C, Q, Z"),
        }
    }
    path
}
