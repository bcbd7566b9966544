//! Text projection of the form and the current result. No decisions here.

use std::fmt::Write;

use crate::assessor::FuzzyDegrees;
use crate::form::{Field, FormState};
use crate::store::ResultStore;

const UNKNOWN: &str = "Desconocido";
const PLACEHOLDER: &str = "Ingrese todos los campos para mostrar su IMC y recomendaciones";

/// Human label for a BMI fuzzy category, as the service names them.
pub fn bmi_label(key: &str) -> &str {
    match key {
        "bajo" => "Bajo peso",
        "normal" => "Normal",
        "sobrepeso" => "Sobrepeso",
        "obesidad1" => "Obesidad tipo 1",
        "obesidad2" => "Obesidad tipo 2",
        other => other,
    }
}

/// Human label for a risk fuzzy category.
pub fn risk_label(key: &str) -> &str {
    match key {
        "muy_bajo" => "Muy bajo",
        "bajo" => "Bajo",
        "medio" => "Medio",
        "alto" => "Alto",
        "muy_alto" => "Muy alto",
        other => other,
    }
}

/// Degrees above zero, highest first, clamped to [0, 1] and labelled.
fn format_degrees(degrees: &FuzzyDegrees, label: fn(&str) -> &str) -> String {
    let mut entries: Vec<(&str, f64)> = degrees
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(k, v)| (k.as_str(), v.clamp(0.0, 1.0)))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    if entries.is_empty() {
        return "—".to_string();
    }
    entries
        .iter()
        .map(|(k, v)| format!("{} {:.2}", label(k), v))
        .collect::<Vec<_>>()
        .join(" · ")
}

pub fn render(form: &FormState, store: &ResultStore) -> String {
    let mut out = String::new();

    for field in Field::ALL {
        let value = form.value(field);
        let shown = if value.is_empty() { "—" } else { value };
        let _ = writeln!(out, "  {:<7} {} {}", field.name(), shown, field.unit());
    }
    let sex = form.sex().map(|s| s.as_str()).unwrap_or("—");
    let _ = writeln!(out, "  {:<7} {}", "genero", sex);
    out.push('\n');

    let result = store.current();
    let bmi = result
        .map(|r| format!("{:.1}", r.bmi_value))
        .unwrap_or_default();
    let _ = writeln!(out, "  TU IMC ES {bmi}");
    let _ = writeln!(
        out,
        "  Clasificación de peso: {}",
        result.map(|r| r.category_label.as_str()).unwrap_or(UNKNOWN)
    );
    let _ = writeln!(
        out,
        "  Riesgo de enfermedad relacionada: {}",
        result.map(|r| r.risk_label.as_str()).unwrap_or(UNKNOWN)
    );
    let _ = writeln!(
        out,
        "  Riesgo en términos numéricos del 1 al 10: {}",
        result
            .map(|r| r.risk_score.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    );
    out.push('\n');

    match result {
        Some(r) => {
            let _ = writeln!(out, "  Estados difusos");
            let _ = writeln!(out, "    IMC:    {}", format_degrees(&r.bmi_degrees, bmi_label));
            let _ = writeln!(
                out,
                "    Riesgo: {}",
                format_degrees(&r.risk_degrees, risk_label)
            );
            let _ = writeln!(out, "  Recomendaciones: {}", r.recommendations);
        }
        None => {
            let _ = writeln!(out, "  {PLACEHOLDER}");
        }
    }

    if let Some(kind) = store.last_error() {
        let _ = writeln!(out, "  ! último cálculo falló: {kind}");
    }

    out
}
