use serde::Serialize;

/// The SAPT terms reported per conformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaptTerm {
    Electrostatics,
    Exchange,
    Induction,
    Dispersion,
    Total,
}

impl SaptTerm {
    /// Terms shown as bars; the total is tabulated only.
    pub const DECOMPOSITION: [SaptTerm; 4] = [
        SaptTerm::Electrostatics,
        SaptTerm::Exchange,
        SaptTerm::Induction,
        SaptTerm::Dispersion,
    ];

    pub const ALL: [SaptTerm; 5] = [
        SaptTerm::Electrostatics,
        SaptTerm::Exchange,
        SaptTerm::Induction,
        SaptTerm::Dispersion,
        SaptTerm::Total,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SaptTerm::Electrostatics => "Electrostatics",
            SaptTerm::Exchange => "Exchange",
            SaptTerm::Induction => "Induction",
            SaptTerm::Dispersion => "Dispersion",
            SaptTerm::Total => "Total SAPT",
        }
    }

    pub fn latex_header(self) -> &'static str {
        match self {
            SaptTerm::Electrostatics => r"$E_{\mathrm{elst}}$ (kJ/mol)",
            SaptTerm::Exchange => r"$E_{\mathrm{exch}}$ (kJ/mol)",
            SaptTerm::Induction => r"$E_{\mathrm{ind}}$ (kJ/mol)",
            SaptTerm::Dispersion => r"$E_{\mathrm{disp}}$ (kJ/mol)",
            SaptTerm::Total => r"$E_{\mathrm{tot}}$ (kJ/mol)",
        }
    }
}

/// Interaction energy components in kJ/mol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SaptComponents {
    pub electrostatics: f64,
    pub exchange: f64,
    pub induction: f64,
    pub dispersion: f64,
    pub total: f64,
}

impl SaptComponents {
    pub fn get(&self, term: SaptTerm) -> f64 {
        match term {
            SaptTerm::Electrostatics => self.electrostatics,
            SaptTerm::Exchange => self.exchange,
            SaptTerm::Induction => self.induction,
            SaptTerm::Dispersion => self.dispersion,
            SaptTerm::Total => self.total,
        }
    }

    /// Column-wise mean, `None` for an empty slice.
    pub fn mean(items: &[SaptComponents]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let n = items.len() as f64;
        let sum = |term: SaptTerm| items.iter().map(|c| c.get(term)).sum::<f64>() / n;
        Some(Self {
            electrostatics: sum(SaptTerm::Electrostatics),
            exchange: sum(SaptTerm::Exchange),
            induction: sum(SaptTerm::Induction),
            dispersion: sum(SaptTerm::Dispersion),
            total: sum(SaptTerm::Total),
        })
    }
}

/// One SAPT calculation on a snapshot taken from a pulling run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformation {
    pub frame: i64,
    pub ion: String,
    /// Sequential label after sorting by frame (`C1`, `C2`, ...).
    pub label: String,
    /// Ion–peptide centre-of-mass distance in Å, when a distance table was supplied.
    pub com_distance: Option<f64>,
    pub energies: SaptComponents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IonSummary {
    pub ion: String,
    /// Label used in the typeset table (may contain TeX, e.g. `K$^+$`).
    pub table_label: String,
    /// Label used in figure titles (e.g. `K⁺`).
    pub plot_label: String,
    pub conformations: Vec<Conformation>,
    pub average: SaptComponents,
}
