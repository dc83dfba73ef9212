//! Diff rendering for divergence reports.

/// Render a text diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let lines = expected.lines().count().max(actual.lines().count());
    let mut e_lines = expected.lines();
    let mut a_lines = actual.lines();
    for i in 0..lines {
        let e = e_lines.next().unwrap_or("<absent>");
        let a = a_lines.next().unwrap_or("<absent>");
        if e != a {
            out.push_str(&format!("@@ line {} @@\n", i + 1));
            out.push_str(&format!("-{e}\n"));
            out.push_str(&format!("+{a}\n"));
        }
    }
    out
}
