use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use conecta_cnpj::amostra::linhas_amostra;
use conecta_cnpj::api;
use conecta_cnpj::config::ConfiguracaoServidor;
use conecta_cnpj::consultas;
use conecta_cnpj::database::Database;
use conecta_cnpj::process::{importar_substituindo, ler_linhas_json, ResultadoImportacao};
use conecta_cnpj::ui;
use conecta_cnpj::utils;

#[derive(Parser)]
#[command(name = "conecta-cnpj")]
#[command(about = "Diretório de empresas locais a partir de planilhas de CNPJ", long_about = None)]
struct Cli {
    /// Modo silencioso (menos saída)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Modo verboso (mais detalhes)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inicia o servidor web da API do diretório
    Server(ConfiguracaoServidor),
    /// Importa um lote num banco novo e mostra as estatísticas (não inicia servidor)
    Importar {
        /// Arquivo JSON com as linhas da planilha (padrão: lote de amostra)
        #[arg(short, long)]
        arquivo: Option<PathBuf>,
        /// Quantos erros de linha exibir
        #[arg(long, default_value_t = 10)]
        max_erros: usize,
    },
}

fn init_tracing(quiet: bool, verbose: bool, padrao: &str) {
    let nivel = if quiet {
        "warn"
    } else if verbose {
        "conecta_cnpj=debug,actix_web=debug"
    } else {
        padrao
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(nivel)))
        .init();
}

fn carregar_lote(arquivo: Option<&PathBuf>) -> Result<Vec<conecta_cnpj::models::LinhaPlanilha>> {
    match arquivo {
        Some(caminho) => {
            ui::print_info(&format!("Lendo linhas de {:?}", caminho));
            ler_linhas_json(caminho)
        }
        None => {
            ui::print_info("Usando lote de amostra");
            Ok(linhas_amostra())
        }
    }
}

fn mostrar_resultado(resultado: &ResultadoImportacao, db: &Database, max_erros: usize) {
    let stats = consultas::estatisticas(db, Utc::now());

    if resultado.erros.is_empty() {
        ui::print_success(&format!("{} linha(s) importada(s)", resultado.sucesso));
    } else {
        ui::print_warning(&format!(
            "{} linha(s) importada(s), {} recusada(s)",
            resultado.sucesso,
            resultado.erros.len()
        ));
    }
    ui::print_verbose(&format!(
        "Aceitas: {}",
        utils::format_progress(resultado.sucesso, resultado.total_linhas())
    ));
    ui::print_row_errors(&resultado.erros, max_erros);

    ui::print_statistics("Estatísticas:", &[
        ("Empresas", stats.resumo.total_companies),
        ("Ativas", stats.resumo.active_companies),
        ("Categorias usadas", stats.resumo.categories_used),
        ("Com telefone", stats.companies_with_phone),
        ("Com e-mail", stats.companies_with_email),
        ("Com nome fantasia", stats.companies_with_fantasy_name),
    ]);
    let por_categoria: Vec<(&str, usize)> = stats.resumo.companies_by_category.iter().collect();
    ui::print_statistics("Empresas por categoria:", &por_categoria);
    for bairro in &stats.top_neighborhoods {
        ui::print_verbose(&format!("{}: {}", bairro.name, bairro.count));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Inicializa o módulo de UI com as configurações globais
    ui::init(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Server(config) => {
            init_tracing(cli.quiet, cli.verbose, "conecta_cnpj=info,actix_web=info");

            let mut db = Database::new();
            if config.amostra || config.dados.is_some() {
                let linhas = carregar_lote(config.dados.as_ref())?;
                let resultado = importar_substituindo(&mut db, &linhas, Utc::now());
                if !resultado.erros.is_empty() {
                    ui::print_warning(&format!(
                        "{} linha(s) recusada(s) na carga inicial",
                        resultado.erros.len()
                    ));
                }
            }
            api::start_server(&config, db).await?;
        }
        Commands::Importar { arquivo, max_erros } => {
            init_tracing(cli.quiet, cli.verbose, "warn");
            ui::print_header("📋 Importação de lote");

            let linhas = carregar_lote(arquivo.as_ref())?;
            let mut db = Database::new();
            let resultado = importar_substituindo(&mut db, &linhas, Utc::now());
            mostrar_resultado(&resultado, &db, max_erros);
            ui::print_separator();
        }
    }

    Ok(())
}
