//! Lote fixo usado no lugar da planilha enviada: a leitura de XLSX ainda não
//! existe, então a importação sem linhas carrega estes dados.

use crate::models::LinhaPlanilha;
use crate::utils::preencher_zeros;

const BAIRROS: [&str; 7] = [
    "CENTRO",
    "SETOR NORTE",
    "SETOR SUL",
    "PLANO DIRETOR NORTE",
    "PLANO DIRETOR SUL",
    "JARDIM AURENY",
    "TAQUARALTO",
];

const CNAES: [(&str, &str); 7] = [
    ("4753900", "COM. VAREJO ELETRODOMÉSTICOS ÁUDIO VÍDEO"),
    ("5611201", "RESTAURANTES"),
    ("4541206", "COM. VAREJO PEÇAS E ACESS. MOTOS"),
    ("9602501", "CABELEIREIROS"),
    ("4711301", "HIPERMERCADOS"),
    ("8630501", "ATIVIDADES DE ATENDIMENTO HOSPITALAR"),
    ("4120400", "CONSTRUÇÃO DE EDIFÍCIOS"),
];

const EMPRESAS_GERADAS: usize = 50;

/// 3 empresas reais da base de Palmas seguidas de 50 geradas.
pub fn linhas_amostra() -> Vec<LinhaPlanilha> {
    let mut linhas = empresas_fixas();
    linhas.extend((0..EMPRESAS_GERADAS).map(empresa_gerada));
    linhas
}

fn texto(valor: &str) -> Option<String> {
    Some(valor.to_string())
}

fn empresas_fixas() -> Vec<LinhaPlanilha> {
    vec![
        LinhaPlanilha {
            cnpj: texto("00.335.250/0001-82"),
            razao_social: texto("OLIVEIRA & CRUZ LTDA"),
            nome_fantasia: texto("MUSIC CENTER THE FUTURE SOUND"),
            natureza_juridica: texto("LTDA"),
            porte_empresa: texto("ME"),
            cnae_fiscal: texto("4753900"),
            descricao_cnae: texto("COM. VAREJO ELETRODOMÉSTICOS ÁUDIO VÍDEO"),
            tipo_logradouro: texto("QUADRA"),
            logradouro: texto("ACNE I, CONJ. 03, LT 11"),
            numero: texto("S/N"),
            complemento: texto("SALA 03"),
            bairro: texto("CENTRO"),
            cep: texto("77016524"),
            data_inicio: texto("08/12/1994"),
            situacao_cadastral: texto("ATIVA"),
            ..Default::default()
        },
        LinhaPlanilha {
            cnpj: texto("00.362.448/0001-55"),
            razao_social: texto("MANOEL MARLON PEREIRA"),
            nome_fantasia: texto("PAPALMAS RESTAURANTE E CHOPPERIA SERRA DO CARMO"),
            natureza_juridica: texto("EMPRESÁRIO INDIV."),
            porte_empresa: texto("MGE"),
            cnae_fiscal: texto("5611201"),
            descricao_cnae: texto("RESTAURANTES"),
            logradouro: texto("ACSE I CONJ 1 LT 22"),
            numero: texto("S/N"),
            bairro: texto("CENTRO"),
            cep: texto("77016524"),
            data_inicio: texto("22/12/1994"),
            situacao_cadastral: texto("ATIVA"),
            ..Default::default()
        },
        LinhaPlanilha {
            cnpj: texto("02.378.576/0001-12"),
            razao_social: texto("REGINEIA GOMES DE CARVALHO SANTOS LTDA"),
            nome_fantasia: texto("MOTO PECAS GALDINO"),
            natureza_juridica: texto("LTDA"),
            porte_empresa: texto("ME"),
            cnae_fiscal: texto("4541206"),
            descricao_cnae: texto("COM. VAREJO PEÇAS E ACESS. MOTOS"),
            logradouro: texto("103 NORTE RUA NO 05 LOTE 10 CJ 03"),
            numero: texto("10"),
            bairro: texto("SETOR NORTE"),
            cep: texto("77001020"),
            telefone1: texto("6332153206"),
            data_inicio: texto("30/01/1998"),
            situacao_cadastral: texto("ATIVA"),
            ..Default::default()
        },
    ]
}

fn empresa_gerada(i: usize) -> LinhaPlanilha {
    let base = preencher_zeros(&(i + 1_000_000).to_string(), 8);
    let (cnae, descricao) = CNAES[i % CNAES.len()];

    LinhaPlanilha {
        cnpj: Some(format!(
            "{}.{}.{}/0001-{:02}",
            &base[0..2],
            &base[2..5],
            &base[5..8],
            i % 99
        )),
        razao_social: Some(format!("EMPRESA {} LTDA", i + 1)),
        nome_fantasia: Some(format!("NEGÓCIO {}", i + 1)),
        natureza_juridica: texto("LTDA"),
        porte_empresa: texto(if i % 3 == 0 { "MGE" } else { "ME" }),
        cnae_fiscal: texto(cnae),
        descricao_cnae: texto(descricao),
        tipo_logradouro: texto("QUADRA"),
        logradouro: Some(format!("QUADRA {} NORTE", 100 + i)),
        numero: Some((i + 1).to_string()),
        bairro: texto(BAIRROS[i % BAIRROS.len()]),
        cep: Some(format!("7701{:04}", i % 9999)),
        telefone1: (i % 2 == 0).then(|| format!("63321{:05}", i % 99999)),
        email: (i % 3 == 0).then(|| format!("contato{}@empresa.com", i)),
        data_inicio: Some(format!("{:02}/{:02}/20{:02}", i % 28 + 1, i % 12 + 1, i % 25)),
        situacao_cadastral: texto("ATIVA"),
        ..Default::default()
    }
}
