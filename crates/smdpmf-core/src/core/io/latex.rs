use crate::core::models::sapt::{IonSummary, SaptComponents, SaptTerm};
use std::fmt::Write;

fn push_row(out: &mut String, ion: &str, label: &str, energies: &SaptComponents) {
    let _ = write!(out, "{} & {}", ion, label);
    for term in SaptTerm::ALL {
        let _ = write!(out, " & {:.2}", energies.get(term));
    }
    out.push_str(" \\\\\n");
}

/// Renders the per-conformation SAPT table with one `Average` row after each ion.
///
/// Labels are written verbatim so they may contain TeX markup.
pub fn render_sapt_table(groups: &[IonSummary], caption: &str, label: &str) -> String {
    let mut out = String::new();
    out.push_str("\\begin{table}\n");
    let _ = writeln!(out, "\\caption{{{}}}", caption);
    let _ = writeln!(out, "\\label{{{}}}", label);
    out.push_str("\\begin{tabular}{llccccc}\n\\toprule\n");

    out.push_str("Ion & Conformation");
    for term in SaptTerm::ALL {
        let _ = write!(out, " & {}", term.latex_header());
    }
    out.push_str(" \\\\\n\\midrule\n");

    for group in groups {
        for conformation in &group.conformations {
            push_row(
                &mut out,
                &group.table_label,
                &conformation.label,
                &conformation.energies,
            );
        }
        push_row(&mut out, &group.table_label, "Average", &group.average);
    }

    out.push_str("\\bottomrule\n\\end{tabular}\n\\end{table}\n");
    out
}
