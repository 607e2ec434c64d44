//! Text heatmap for the correlation matrix.
//!
//! This is intentionally "dumb" (fixed character ramp), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each cell is two characters: a sign (`-` for negative, space otherwise)
//! and a shade from the ramp below, darker = stronger |r|. Undefined cells
//! (zero variance / too few pairs) render as `??`.

use crate::domain::CorrelationMatrix;

/// Shade ramp from weak to strong correlation magnitude.
const RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Render the heatmap with row labels and a legend.
pub fn render_heatmap(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    out.push_str("Correlation heatmap (|r| shade, '-' marks negative):\n");

    let label_width = matrix
        .columns
        .iter()
        .map(|c| c.len().min(15))
        .max()
        .unwrap_or(0);

    // Column index header; full names are listed in the legend.
    out.push_str(&format!("{:>label_width$}  ", ""));
    for j in 0..matrix.len() {
        out.push_str(&format!("{:>2}", col_tag(j)));
    }
    out.push('\n');

    for (i, name) in matrix.columns.iter().enumerate() {
        out.push_str(&format!("{:>label_width$}  ", clip(name, 15)));
        for j in 0..matrix.len() {
            out.push_str(&cell_chars(matrix.get(i, j)));
        }
        out.push_str(&format!(" {}\n", col_tag(i)));
    }

    out.push_str("\nshade: ");
    for (k, ch) in RAMP.iter().enumerate() {
        out.push_str(&format!("[{ch}]>={:.1} ", k as f64 / 10.0));
    }
    out.push('\n');
    out
}

fn cell_chars(r: Option<f64>) -> String {
    match r {
        Some(r) => {
            let sign = if r < 0.0 { '-' } else { ' ' };
            format!("{sign}{}", shade(r.abs()))
        }
        None => "??".to_string(),
    }
}

/// Map |r| in [0, 1] onto the ramp.
fn shade(magnitude: f64) -> char {
    let idx = (magnitude.clamp(0.0, 1.0) * 10.0).floor() as usize;
    RAMP[idx.min(RAMP.len() - 1)]
}

/// Short column tag: a, b, ..., z, A, ... for matrix axes.
fn col_tag(idx: usize) -> char {
    const TAGS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    TAGS.get(idx).copied().unwrap_or(b'?') as char
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_ramp_is_monotone() {
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(0.05), ' ');
        assert_eq!(shade(0.55), '+');
        assert_eq!(shade(1.0), '@');
    }

    #[test]
    fn negative_cells_carry_a_sign() {
        assert_eq!(cell_chars(Some(-0.85)), "-%");
        assert_eq!(cell_chars(Some(0.85)), " %");
        assert_eq!(cell_chars(None), "??");
    }

    #[test]
    fn heatmap_renders_all_rows() {
        let m = CorrelationMatrix {
            columns: vec!["a".to_string(), "b".to_string()],
            values: vec![
                vec![Some(1.0), Some(-0.5)],
                vec![Some(-0.5), Some(1.0)],
            ],
        };
        let text = render_heatmap(&m);
        // Header + 2 data rows + blank + legend.
        assert!(text.lines().count() >= 4);
        assert!(text.contains('@'));
        assert!(text.contains("-+"));
    }
}
