use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::texto_ou_numero;

/// Linha crua exportada da planilha, com os nomes de coluna originais.
///
/// Todos os campos são opcionais aqui: a obrigatoriedade de CNPJ e Razão Social
/// é verificada linha a linha na normalização, para que uma linha ruim não
/// derrube o lote inteiro. CEP e CNAE chegam como número quando a planilha
/// formata a coluna como numérica.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinhaPlanilha {
    #[serde(rename = "CNPJ", default, deserialize_with = "texto_ou_numero")]
    pub cnpj: Option<String>,
    #[serde(rename = "Razão Social", default, deserialize_with = "texto_ou_numero")]
    pub razao_social: Option<String>,
    #[serde(rename = "Nome Fantasia", default, deserialize_with = "texto_ou_numero")]
    pub nome_fantasia: Option<String>,
    #[serde(rename = "Natureza Jurídica", default, deserialize_with = "texto_ou_numero")]
    pub natureza_juridica: Option<String>,
    #[serde(rename = "Porte da Empresa", default, deserialize_with = "texto_ou_numero")]
    pub porte_empresa: Option<String>,
    #[serde(rename = "CNAE Fiscal", default, deserialize_with = "texto_ou_numero")]
    pub cnae_fiscal: Option<String>,
    #[serde(rename = "Descrição CNAE Fiscal", default, deserialize_with = "texto_ou_numero")]
    pub descricao_cnae: Option<String>,
    #[serde(rename = "Tipo Logradouro", default, deserialize_with = "texto_ou_numero")]
    pub tipo_logradouro: Option<String>,
    #[serde(rename = "Logradouro", default, deserialize_with = "texto_ou_numero")]
    pub logradouro: Option<String>,
    #[serde(rename = "Número", default, deserialize_with = "texto_ou_numero")]
    pub numero: Option<String>,
    #[serde(rename = "Complemento", default, deserialize_with = "texto_ou_numero")]
    pub complemento: Option<String>,
    #[serde(rename = "Bairro", default, deserialize_with = "texto_ou_numero")]
    pub bairro: Option<String>,
    #[serde(rename = "CEP", default, deserialize_with = "texto_ou_numero")]
    pub cep: Option<String>,
    #[serde(rename = "Telefone 1", default, deserialize_with = "texto_ou_numero")]
    pub telefone1: Option<String>,
    #[serde(rename = "Telefone 2", default, deserialize_with = "texto_ou_numero")]
    pub telefone2: Option<String>,
    #[serde(rename = "email", default, deserialize_with = "texto_ou_numero")]
    pub email: Option<String>,
    #[serde(rename = "Data de Início", default, deserialize_with = "texto_ou_numero")]
    pub data_inicio: Option<String>,
    #[serde(rename = "Situação Cadastral", default, deserialize_with = "texto_ou_numero")]
    pub situacao_cadastral: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endereco {
    pub tipo_logradouro: Option<String>,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cep: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contato {
    pub telefone1: Option<String>,
    pub telefone2: Option<String>,
    pub email: Option<String>,
}

/// Registro canônico de uma empresa no diretório.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Empresa {
    pub id: String,
    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub natureza_juridica: String,
    pub porte: String,
    pub cnae_fiscal: String,
    pub descricao_cnae: String,
    pub categoria: String,
    pub endereco: Endereco,
    pub contato: Contato,
    pub data_inicio: String,
    pub situacao: String,
    pub ativa: bool,
    pub criado_em: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: String,
    pub nome: String,
    pub icone: String,
    pub cor: String,
    pub cnaes: Vec<String>,
}
