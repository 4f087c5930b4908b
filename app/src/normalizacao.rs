use chrono::{DateTime, Utc};

use crate::categorias::classificar;
use crate::error::ErroValidacao;
use crate::models::{Categoria, Contato, Empresa, Endereco, LinhaPlanilha};
use crate::utils::{preencher_zeros, somente_digitos, texto_preenchido};

pub const LARGURA_CNAE: usize = 7;
pub const LARGURA_CEP: usize = 8;
pub const NUMERO_NAO_INFORMADO: &str = "S/N";
pub const SITUACAO_ATIVA: &str = "ATIVA";

/// Converte uma linha da planilha no registro canônico.
///
/// A categoria é sempre calculada a partir do CNAE, nunca lida da entrada.
pub fn normalizar(
    linha: &LinhaPlanilha,
    categorias: &[Categoria],
    criado_em: DateTime<Utc>,
) -> Result<Empresa, ErroValidacao> {
    let (cnpj, razao_social) = match (
        texto_preenchido(&linha.cnpj),
        texto_preenchido(&linha.razao_social),
    ) {
        (Some(cnpj), Some(razao)) => (cnpj, razao),
        _ => return Err(ErroValidacao::CamposObrigatorios),
    };

    let id = somente_digitos(cnpj);
    if id.is_empty() {
        tracing::warn!("CNPJ sem dígitos ({:?}), registro ficará com id vazio", cnpj);
    }

    let cnae_fiscal = preencher_zeros(linha.cnae_fiscal.as_deref().unwrap_or(""), LARGURA_CNAE);
    let categoria = classificar(categorias, &cnae_fiscal);
    let situacao = texto(&linha.situacao_cadastral);

    Ok(Empresa {
        id,
        cnpj: cnpj.to_string(),
        razao_social: razao_social.to_string(),
        nome_fantasia: texto_preenchido(&linha.nome_fantasia)
            .unwrap_or(razao_social)
            .to_string(),
        natureza_juridica: texto(&linha.natureza_juridica),
        porte: texto(&linha.porte_empresa),
        cnae_fiscal,
        descricao_cnae: texto(&linha.descricao_cnae),
        categoria,
        endereco: Endereco {
            tipo_logradouro: opcional(&linha.tipo_logradouro),
            logradouro: texto(&linha.logradouro),
            numero: texto_preenchido(&linha.numero)
                .unwrap_or(NUMERO_NAO_INFORMADO)
                .to_string(),
            complemento: opcional(&linha.complemento),
            bairro: texto(&linha.bairro),
            cep: preencher_zeros(linha.cep.as_deref().unwrap_or(""), LARGURA_CEP),
        },
        contato: Contato {
            telefone1: opcional(&linha.telefone1),
            telefone2: opcional(&linha.telefone2),
            email: opcional(&linha.email),
        },
        data_inicio: texto(&linha.data_inicio),
        ativa: situacao == SITUACAO_ATIVA,
        situacao,
        criado_em,
    })
}

fn texto(valor: &Option<String>) -> String {
    valor.clone().unwrap_or_default()
}

fn opcional(valor: &Option<String>) -> Option<String> {
    texto_preenchido(valor).map(str::to_string)
}
