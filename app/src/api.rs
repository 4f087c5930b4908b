use std::sync::{Arc, Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, HttpResponse, Result as ActixResult};
use anyhow::anyhow;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::amostra::linhas_amostra;
use crate::config::ConfiguracaoServidor;
use crate::consultas::{self, FiltroEmpresas, Localidade, ResumoProcessamento, LIMITE_PADRAO};
use crate::database::Database;
use crate::error::ApiError;
use crate::models::LinhaPlanilha;
use crate::process::importar_substituindo;
use crate::ui;

/// Quantos erros de linha voltam na resposta da importação.
pub const ERROS_EXIBIDOS: usize = 10;

/// Limite padrão do corpo da importação (32 MiB, cerca de 100 mil linhas).
pub const LIMITE_CORPO_IMPORTACAO: usize = 32 * 1024 * 1024;

pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub localidade: Localidade,
    pub limite_corpo: usize,
}

impl AppState {
    pub fn new(db: Database, localidade: Localidade) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            localidade,
            limite_corpo: LIMITE_CORPO_IMPORTACAO,
        }
    }

    pub fn com_limite_corpo(mut self, limite: usize) -> Self {
        self.limite_corpo = limite;
        self
    }

    fn banco(&self) -> Result<MutexGuard<'_, Database>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Interno(anyhow!("lock do banco em memória envenenado")))
    }
}

#[derive(Debug, Deserialize)]
pub struct ParametrosListagem {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PedidoImportacao {
    #[serde(default)]
    pub rows: Option<Vec<LinhaPlanilha>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoImportacao {
    pub total_processed: usize,
    pub errors: usize,
    pub error_details: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespostaImportacao {
    pub message: String,
    pub stats: ResumoImportacao,
    pub processing_stats: ResumoProcessamento,
}

pub async fn listar_empresas(
    query: web::Query<ParametrosListagem>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let params = query.into_inner();
    let filtro = FiltroEmpresas {
        categoria: params.category,
        busca: params.search,
        limit: params.limit.unwrap_or(LIMITE_PADRAO),
        offset: params.offset.unwrap_or(0),
    };

    let db = state.banco()?;
    let pagina = consultas::listar_empresas(&db, &filtro);
    Ok(HttpResponse::Ok().json(pagina))
}

pub async fn buscar_empresa(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let db = state.banco()?;
    let detalhe = consultas::buscar_detalhe(&db, &id, &state.localidade)
        .ok_or_else(|| ApiError::NaoEncontrado("Empresa não encontrada".to_string()))?;
    Ok(HttpResponse::Ok().json(detalhe))
}

pub async fn listar_categorias(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = state.banco()?;
    Ok(HttpResponse::Ok().json(consultas::categorias_com_contagem(&db)))
}

/// Importa as linhas enviadas em `{"rows": [...]}`. Sem corpo (ou sem `rows`)
/// importa o lote de amostra. Em ambos os casos o conteúdo anterior é
/// substituído.
///
/// O corpo é lido aqui, e não por `web::Bytes`, para que o estouro do limite
/// saia no formato de erro da API.
pub async fn importar(
    payload: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let body = payload
        .to_bytes_limited(state.limite_corpo)
        .await
        .map_err(|_| ApiError::CorpoMuitoGrande(state.limite_corpo))?
        .map_err(|e| ApiError::RequisicaoInvalida(format!("falha ao ler o corpo: {}", e)))?;

    let pedido: PedidoImportacao = if body.iter().all(u8::is_ascii_whitespace) {
        PedidoImportacao::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::RequisicaoInvalida(format!("JSON inválido: {}", e)))?
    };

    let linhas = match pedido.rows {
        Some(linhas) => linhas,
        None => {
            tracing::info!("Nenhuma linha enviada, usando lote de amostra");
            linhas_amostra()
        }
    };

    let mut db = state.banco()?;
    let resultado = importar_substituindo(&mut db, &linhas, Utc::now());

    let resposta = RespostaImportacao {
        message: "Arquivo processado com sucesso".to_string(),
        stats: ResumoImportacao {
            total_processed: resultado.sucesso,
            errors: resultado.erros.len(),
            error_details: resultado.erros.into_iter().take(ERROS_EXIBIDOS).collect(),
        },
        processing_stats: consultas::resumo_processamento(&db),
    };
    Ok(HttpResponse::Ok().json(resposta))
}

pub async fn limpar(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let mut db = state.banco()?;
    db.limpar_empresas();
    tracing::info!("Empresas removidas do banco em memória");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Banco de dados limpo com sucesso",
        "stats": consultas::estatisticas(&db, Utc::now()),
    })))
}

pub async fn estatisticas(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = state.banco()?;
    Ok(HttpResponse::Ok().json(consultas::estatisticas(&db, Utc::now())))
}

async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "mensagem": "API do diretório está funcionando"
    })))
}

/// Rotas da API. Parâmetros de query malformados viram 400 no formato de
/// erro da API.
pub fn configurar_rotas(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::RequisicaoInvalida(err.to_string()).into()
    }))
    .route("/api/companies", web::get().to(listar_empresas))
    .route("/api/companies/{id}", web::get().to(buscar_empresa))
    .route("/api/categories", web::get().to(listar_categorias))
    .route("/api/admin/upload", web::post().to(importar))
    .route("/api/admin/clear", web::post().to(limpar))
    .route("/api/admin/stats", web::get().to(estatisticas))
    .route("/health", web::get().to(health_check));
}

pub async fn start_server(config: &ConfiguracaoServidor, db: Database) -> anyhow::Result<()> {
    let total = db.total_empresas();
    let app_state = web::Data::new(
        AppState::new(db, config.localidade()).com_limite_corpo(config.limite_upload()),
    );
    let address = config.endereco();

    ui::print_header("🌐 Servidor API REST");
    ui::print_success(&format!("Servidor iniciando em http://{}", address));
    ui::print_info(&format!("Empresas carregadas: {}", total));
    ui::print_verbose(&format!("Limite do upload: {} MiB", config.limite_upload_mb));
    ui::print_info("Endpoints disponíveis:");
    ui::print_endpoint("GET  /api/companies", "Lista empresas (category, search, limit, offset)");
    ui::print_endpoint("GET  /api/companies/{id}", "Detalhes de uma empresa");
    ui::print_endpoint("GET  /api/categories", "Categorias com contagem de empresas");
    ui::print_endpoint("POST /api/admin/upload", "Importa lote (substitui o atual)");
    ui::print_endpoint("POST /api/admin/clear", "Remove todas as empresas");
    ui::print_endpoint("GET  /api/admin/stats", "Estatísticas do painel");
    ui::print_endpoint("GET  /health", "Verifica status do servidor");
    ui::print_verbose(&format!("Exemplo: curl 'http://{}/api/companies?search=centro'", address));
    ui::print_separator();

    tracing::info!("Escutando em {}", address);

    actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .configure(configurar_rotas)
    })
    .bind(&address)?
    .workers(num_cpus::get())
    .run()
    .await?;

    Ok(())
}
