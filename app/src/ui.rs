//! Saída colorida do terminal. `--quiet` silencia tudo, `--verbose` libera
//! as linhas de detalhe.

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

const LARGURA_SEPARADOR: usize = 60;

pub fn init(quiet: bool, verbose: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    VERBOSE.store(verbose, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

fn emitir(linha: impl std::fmt::Display) {
    if !is_quiet() {
        println!("{}", linha);
    }
}

pub fn print_info(message: &str) {
    emitir(format!("{} {}", "ℹ".blue(), message));
}

pub fn print_success(message: &str) {
    emitir(format!("{} {}", "✓".green().bold(), message.green()));
}

pub fn print_warning(message: &str) {
    emitir(format!("{} {}", "⚠".yellow().bold(), message.yellow()));
}

/// Título sublinhado na largura do texto (emojis contam como um caractere).
pub fn print_header(message: &str) {
    emitir(format!("\n{}", message.bold().cyan()));
    emitir(sublinhado(message).cyan());
}

pub fn print_verbose(message: &str) {
    if is_verbose() {
        emitir(format!("  {}", message.dimmed()));
    }
}

pub fn print_endpoint(rota: &str, descricao: &str) {
    emitir(format!("  {} {:<28} - {}", "•".cyan(), rota, descricao));
}

/// Tabela de contagens com os rótulos alinhados. Tabela vazia não imprime
/// nem o título.
pub fn print_statistics(titulo: &str, stats: &[(&str, usize)]) {
    if stats.is_empty() {
        return;
    }

    let largura = largura_rotulos(stats);
    emitir(format!("\n{}", titulo.bold().cyan()));
    for (rotulo, valor) in stats {
        let (rotulo, valor) = linha_estatistica(rotulo, *valor, largura);
        emitir(format!("  {} {}", rotulo.bold(), valor.green()));
    }
}

/// Lista os erros de linha, no máximo `limite`; o resto vira um resumo.
pub fn print_row_errors(erros: &[String], limite: usize) {
    if erros.is_empty() {
        return;
    }

    emitir(format!("\n{}", "Linhas recusadas:".bold().yellow()));
    for erro in erros.iter().take(limite) {
        emitir(format!("  {} {}", "•".yellow(), erro));
    }
    if let Some(resto) = erros_omitidos(erros.len(), limite) {
        emitir(format!("  {}", resto.dimmed()));
    }
}

pub fn print_separator() {
    emitir("=".repeat(LARGURA_SEPARADOR).dimmed());
}

fn sublinhado(texto: &str) -> String {
    "─".repeat(texto.chars().count())
}

fn largura_rotulos(stats: &[(&str, usize)]) -> usize {
    stats
        .iter()
        .map(|(rotulo, _)| rotulo.chars().count())
        .max()
        .unwrap_or(0)
}

// Alinha por caracteres, não bytes: "Saúde" e "Serviços" têm acento.
fn linha_estatistica(rotulo: &str, valor: usize, largura: usize) -> (String, String) {
    let preenchimento = largura.saturating_sub(rotulo.chars().count());
    (
        format!("{}:{}", rotulo, " ".repeat(preenchimento)),
        valor.to_string(),
    )
}

fn erros_omitidos(total: usize, limite: usize) -> Option<String> {
    (total > limite).then(|| format!("... e mais {} erro(s)", total - limite))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotulos_alinhados_por_caractere() {
        let stats = [("Saúde", 3), ("Categorias usadas", 12)];
        let largura = largura_rotulos(&stats);
        assert_eq!(largura, 17);

        let (saude, valor) = linha_estatistica("Saúde", 3, largura);
        let (categorias, _) = linha_estatistica("Categorias usadas", 12, largura);
        assert_eq!(saude.chars().count(), categorias.chars().count());
        assert_eq!(saude, format!("Saúde:{}", " ".repeat(12)));
        assert_eq!(valor, "3");
    }

    #[test]
    fn tabela_vazia_tem_largura_zero() {
        assert_eq!(largura_rotulos(&[]), 0);
        assert_eq!(linha_estatistica("Ativas", 0, 0).0, "Ativas:");
    }

    #[test]
    fn resumo_dos_erros_que_sobram() {
        assert_eq!(erros_omitidos(3, 10), None);
        assert_eq!(erros_omitidos(10, 10), None);
        assert_eq!(erros_omitidos(15, 10).as_deref(), Some("... e mais 5 erro(s)"));
    }

    #[test]
    fn sublinhado_conta_caracteres() {
        assert_eq!(sublinhado("📋 Importação").chars().count(), 12);
    }
}
