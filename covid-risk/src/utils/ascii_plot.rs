use crate::prelude::{Real, INF};

/// ASCII plot of a sequence of positive values.
///
/// Draw each point as a column filled with '*'s up to the maximum height.
/// Returns an empty string for empty or all-zero sequences.
pub fn render_vbars(values: &[Real], height: usize) -> String {
    let max = values.iter().cloned().fold(-INF, Real::max);
    if values.is_empty() || !(max > 0.0) || height == 0 {
        return String::new();
    }
    let step = max / height as Real;

    let mut out = String::with_capacity((values.len() + 1) * height);
    for i in 0..height {
        let h = (height - i) as Real * step;
        let ln: String = values
            .iter()
            .map(|&x| if x >= h - 0.5 * step { '*' } else { ' ' })
            .collect();
        out.push_str(ln.trim_end());
        out.push('\n');
    }
    out.push_str(&"-".repeat(values.len()));
    out
}
