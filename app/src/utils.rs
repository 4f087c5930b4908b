use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Remove tudo que não for dígito ASCII (pontos, barras e traços do CNPJ).
pub fn somente_digitos(valor: &str) -> String {
    valor.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Completa com zeros à esquerda até `largura` caracteres. Valores já longos
/// ficam como estão.
pub fn preencher_zeros(valor: &str, largura: usize) -> String {
    format!("{:0>largura$}", valor, largura = largura)
}

/// Campo opcional vindo da planilha: string vazia conta como ausente.
pub fn texto_preenchido(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().filter(|v| !v.is_empty())
}

/// Aceita texto ou número JSON (planilhas exportam CEP e CNAE como número).
/// Booleanos, listas e objetos são rejeitados.
pub fn texto_ou_numero<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(numero_como_texto(&n))),
        Some(outro) => Err(serde::de::Error::custom(format!(
            "esperado texto ou número, recebido {}",
            outro
        ))),
    }
}

/// Inteiros exportados como ponto flutuante (`4753900.0`) voltam sem a parte
/// decimal, senão o CNAE não casa com a tabela e o CEP ganha um ".0".
fn numero_como_texto(n: &serde_json::Number) -> String {
    if let Some(inteiro) = n.as_u64() {
        return inteiro.to_string();
    }
    if let Some(inteiro) = n.as_i64() {
        return inteiro.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

pub fn format_progress(current: usize, total: usize) -> String {
    if total == 0 {
        return "0.0% (0/0)".to_string();
    }
    let percent = (current as f64 / total as f64) * 100.0;
    format!("{:.1}% ({}/{})", percent, current, total)
}
