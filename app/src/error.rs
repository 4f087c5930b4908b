//! Erros do domínio e da API HTTP.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Falha ao normalizar uma linha da planilha. Nunca interrompe o lote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErroValidacao {
    #[error("CNPJ e Razão Social são obrigatórios")]
    CamposObrigatorios,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NaoEncontrado(String),

    #[error("Requisição inválida: {0}")]
    RequisicaoInvalida(String),

    #[error("Corpo da requisição excede o limite de {0} bytes")]
    CorpoMuitoGrande(usize),

    #[error("Erro interno: {0}")]
    Interno(#[from] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NaoEncontrado(_) => StatusCode::NOT_FOUND,
            ApiError::RequisicaoInvalida(_) => StatusCode::BAD_REQUEST,
            ApiError::CorpoMuitoGrande(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Interno(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mensagem = match self {
            ApiError::NaoEncontrado(msg) => msg.clone(),
            ApiError::RequisicaoInvalida(_) | ApiError::CorpoMuitoGrande(_) => self.to_string(),
            ApiError::Interno(e) => {
                tracing::error!("Erro interno: {:#}", e);
                "Erro interno do servidor".to_string()
            }
        };

        HttpResponse::build(status).json(json!({
            "error": mensagem,
            "status": status.as_u16(),
        }))
    }
}
