use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::models::LinhaPlanilha;
use crate::normalizacao::normalizar;

#[derive(Deserialize)]
#[serde(untagged)]
enum ArquivoLinhas {
    Lista(Vec<LinhaPlanilha>),
    Pedido { rows: Vec<LinhaPlanilha> },
}

/// Lê linhas de planilha exportadas como JSON: uma lista de objetos ou
/// `{"rows": [...]}`, no mesmo formato aceito pela API.
pub fn ler_linhas_json(caminho: &Path) -> Result<Vec<LinhaPlanilha>> {
    let conteudo = fs::read_to_string(caminho)
        .with_context(|| format!("Falha ao ler arquivo: {:?}", caminho))?;
    linhas_de_json(&conteudo).with_context(|| format!("Arquivo com formato inválido: {:?}", caminho))
}

pub fn linhas_de_json(conteudo: &str) -> Result<Vec<LinhaPlanilha>> {
    let arquivo: ArquivoLinhas = serde_json::from_str(conteudo)
        .context("esperado uma lista de linhas ou um objeto {\"rows\": [...]}")?;
    Ok(match arquivo {
        ArquivoLinhas::Lista(linhas) => linhas,
        ArquivoLinhas::Pedido { rows } => rows,
    })
}

/// Resultado de um lote: quantas linhas entraram e o erro de cada linha
/// recusada, na ordem da planilha.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultadoImportacao {
    pub sucesso: usize,
    pub erros: Vec<String>,
}

impl ResultadoImportacao {
    pub fn total_linhas(&self) -> usize {
        self.sucesso + self.erros.len()
    }
}

/// Apaga todas as empresas e carrega o lote no lugar.
///
/// A limpeza acontece antes de qualquer validação: um lote em que nenhuma
/// linha passa deixa o banco vazio. Não é atômico; quem compartilha o banco
/// entre threads precisa segurar o lock durante toda a chamada.
pub fn importar_substituindo(
    db: &mut Database,
    linhas: &[LinhaPlanilha],
    agora: DateTime<Utc>,
) -> ResultadoImportacao {
    let anteriores = db.total_empresas();
    db.limpar_empresas();
    tracing::info!(
        "Substituindo {} empresa(s) por lote de {} linha(s)",
        anteriores,
        linhas.len()
    );
    carregar_linhas(db, linhas, agora)
}

/// Carrega o lote sobre o conteúdo atual (mesmo id: a linha nova vence).
pub fn importar_acrescentando(
    db: &mut Database,
    linhas: &[LinhaPlanilha],
    agora: DateTime<Utc>,
) -> ResultadoImportacao {
    tracing::info!("Acrescentando lote de {} linha(s)", linhas.len());
    carregar_linhas(db, linhas, agora)
}

fn carregar_linhas(
    db: &mut Database,
    linhas: &[LinhaPlanilha],
    agora: DateTime<Utc>,
) -> ResultadoImportacao {
    let mut resultado = ResultadoImportacao::default();

    for (idx, linha) in linhas.iter().enumerate() {
        match normalizar(linha, db.todas_categorias(), agora) {
            Ok(empresa) => {
                db.inserir_empresa(empresa);
                resultado.sucesso += 1;
            }
            Err(e) => {
                tracing::debug!("Linha {} recusada: {}", idx + 1, e);
                resultado.erros.push(format!("Linha {}: {}", idx + 1, e));
            }
        }
    }

    tracing::info!(
        "Lote concluído: {} aceita(s), {} com erro",
        resultado.sucesso,
        resultado.erros.len()
    );
    resultado
}
