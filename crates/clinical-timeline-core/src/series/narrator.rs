//! Leukocyte trend narration.

/// Compare two leukocyte readings into a qualitative message.
///
/// The new value is rendered with pt-BR digit grouping (`13800` → `13.800`).
pub fn explain_leukocytes(previous: f64, current: f64) -> String {
    let value = format_pt_br(current);
    if current > previous {
        format!("Leucócitos subiram ({}/µL) — possível piora.", value)
    } else if current < previous {
        format!("Leucócitos caíram ({}/µL) — possível melhora.", value)
    } else {
        format!("Leucócitos estáveis ({}/µL).", value)
    }
}

/// Format a number the pt-BR way: `.` groups thousands, `,` marks decimals.
pub fn format_pt_br(value: f64) -> String {
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (repr.as_str(), None),
    };

    let digits = int_part.len();
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}
