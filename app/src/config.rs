use std::path::PathBuf;

use clap::Args;

use crate::consultas::Localidade;

/// Opções do servidor. Cada uma pode vir da linha de comando ou do ambiente
/// (inclusive de um `.env` na pasta atual).
#[derive(Debug, Clone, Args)]
pub struct ConfiguracaoServidor {
    /// Endereço do servidor
    #[arg(long, env = "CONECTA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Porta do servidor
    #[arg(short, long, env = "CONECTA_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Cidade exibida no endereço completo das empresas
    #[arg(long, env = "CONECTA_CIDADE", default_value = "Palmas")]
    pub cidade: String,

    /// UF exibida no endereço completo das empresas
    #[arg(long, env = "CONECTA_UF", default_value = "TO")]
    pub uf: String,

    /// Tamanho máximo do corpo de `POST /api/admin/upload`, em MiB
    #[arg(long, env = "CONECTA_LIMITE_UPLOAD_MB", default_value_t = 32)]
    pub limite_upload_mb: usize,

    /// Carrega o lote de amostra ao iniciar
    #[arg(long, conflicts_with = "dados")]
    pub amostra: bool,

    /// Arquivo JSON com linhas da planilha para carregar ao iniciar
    #[arg(long)]
    pub dados: Option<PathBuf>,
}

impl ConfiguracaoServidor {
    pub fn endereco(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn limite_upload(&self) -> usize {
        self.limite_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn localidade(&self) -> Localidade {
        Localidade {
            cidade: self.cidade.clone(),
            uf: self.uf.clone(),
        }
    }
}
