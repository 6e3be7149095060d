use iontrap::engine::candidate::{EvaluatedCandidate, OperatingPoint};
use iontrap::engine::ranking::SweepSummary;
use std::fmt::Write;

fn flag(ok: bool) -> &'static str {
    if ok { "✓" } else { "✗" }
}

/// Renders up to `limit` candidates as a fixed-width table.
pub fn candidate_table(candidates: &[EvaluatedCandidate], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>8}  {:>8}  {:>8}  {:>9}  {:>8}  {:>7}  {:>9}  {:>3}",
        "#", "a' (µm)", "b' (µm)", "h (µm)", "F (MHz)", "V_rf (V)", "q", "depth (eV)", "ok"
    );
    for (i, c) in candidates.iter().take(limit).enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>8.2}  {:>8.2}  {:>8.2}  {:>9.3}  {:>8.2}  {:>7.4}  {:>9.4}  {:>3}",
            i + 1,
            c.a_prime(),
            c.b_prime(),
            c.height,
            c.f_rf(),
            c.v_rf_required(),
            c.q(),
            c.depth,
            flag(c.meets_criteria()),
        );
    }
    if candidates.len() > limit {
        let _ = writeln!(out, "  ... {} more", candidates.len() - limit);
    }
    out
}

/// Renders up to `limit` operating points of a drive scan.
pub fn operating_point_table(points: &[OperatingPoint], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8}  {:>9}  {:>7}  {:>10}  {:>12}  {:>3}",
        "V_rf (V)", "F (MHz)", "q", "depth (eV)", "f_sec (MHz)", "ok"
    );
    for p in points.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:>8.1}  {:>9.3}  {:>7.4}  {:>10.4}  {:>12.3}  {:>3}",
            p.v_rf,
            p.f_rf,
            p.q,
            p.depth,
            p.secular_frequency,
            flag(p.meets_criteria()),
        );
    }
    if points.len() > limit {
        let _ = writeln!(out, "  ... {} more", points.len() - limit);
    }
    out
}

pub fn summary_block(title: &str, summary: &SweepSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  Candidates evaluated:  {}", summary.total);
    let _ = writeln!(
        out,
        "  Meeting all criteria:  {} ({:.1}%)",
        summary.feasible,
        summary.success_rate()
    );
    let _ = writeln!(out, "  Within V_rf limit:     {}", summary.voltage_feasible);
    let _ = writeln!(out, "  Within q limit:        {}", summary.q_feasible);
    let _ = writeln!(out, "  Within depth window:   {}", summary.depth_feasible);
    match summary.min_v_rf {
        Some(v) => {
            let _ = writeln!(out, "  Lowest required V_rf:  {v:.2} V");
        }
        None => {
            let _ = writeln!(out, "  Lowest required V_rf:  n/a");
        }
    }
    match &summary.best {
        Some(best) => {
            let _ = writeln!(
                out,
                "  Best design:           a' = {:.2} µm, b' = {:.2} µm, F = {:.3} MHz, V_rf = {:.2} V",
                best.a_prime(),
                best.b_prime(),
                best.f_rf(),
                best.v_rf_required()
            );
        }
        None => {
            let _ = writeln!(out, "  Best design:           none");
        }
    }
    out
}
