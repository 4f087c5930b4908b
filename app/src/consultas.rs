//! Consultas somente leitura sobre o banco: listagem paginada, detalhe,
//! categorias com contagem e estatísticas do painel administrativo.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};

use crate::categorias::CATEGORIA_TODAS;
use crate::database::Database;
use crate::models::{Categoria, Empresa};

pub const LIMITE_PADRAO: usize = 20;
pub const TOP_BAIRROS: usize = 5;
pub const DIAS_RECENTES: i64 = 7;

#[derive(Debug, Clone, Default)]
pub struct FiltroEmpresas {
    pub categoria: Option<String>,
    pub busca: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaResumo {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_open: bool,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginacao {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginaEmpresas {
    pub companies: Vec<EmpresaResumo>,
    pub pagination: Paginacao,
}

/// Cidade e UF exibidas no endereço completo (a base é de um município só).
#[derive(Debug, Clone, PartialEq)]
pub struct Localidade {
    pub cidade: String,
    pub uf: String,
}

impl Default for Localidade {
    fn default() -> Self {
        Self {
            cidade: "Palmas".to_string(),
            uf: "TO".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoDetalhe {
    pub full: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub zip_code: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContatoDetalhe {
    pub phone1: Option<String>,
    pub phone2: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DadosCadastrais {
    pub cnae: String,
    pub legal_nature: String,
    pub size: String,
    pub founded_at: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaDetalhe {
    pub id: String,
    pub name: String,
    pub legal_name: String,
    pub cnpj: String,
    pub category: String,
    pub category_id: String,
    pub description: String,
    pub address: EnderecoDetalhe,
    pub contact: ContatoDetalhe,
    pub business_info: DadosCadastrais,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoriaComContagem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub cnaes: Vec<String>,
    pub count: usize,
}

/// Números do processamento, devolvidos junto com o resultado da importação.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoProcessamento {
    pub total_companies: usize,
    pub active_companies: usize,
    pub categories_used: usize,
    pub total_categories: usize,
    pub companies_by_category: ContagemPorCategoria,
}

/// Empresas por nome de categoria, na ordem da tabela de categorias. Vira um
/// objeto JSON com as chaves nessa ordem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContagemPorCategoria(Vec<(String, usize)>);

impl ContagemPorCategoria {
    /// Nome repetido fica na posição da primeira ocorrência, com a última
    /// contagem.
    pub fn inserir(&mut self, nome: String, quantidade: usize) {
        match self.0.iter_mut().find(|(existente, _)| *existente == nome) {
            Some((_, atual)) => *atual = quantidade,
            None => self.0.push((nome, quantidade)),
        }
    }

    pub fn get(&self, nome: &str) -> Option<usize> {
        self.0.iter().find(|(n, _)| n == nome).map(|(_, qtd)| *qtd)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(nome, qtd)| (nome.as_str(), *qtd))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, usize)> for ContagemPorCategoria {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut contagem = Self::default();
        for (nome, quantidade) in iter {
            contagem.inserir(nome, quantidade);
        }
        contagem
    }
}

impl Serialize for ContagemPorCategoria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BairroContagem {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstatisticasAdmin {
    #[serde(flatten)]
    pub resumo: ResumoProcessamento,
    pub companies_with_phone: usize,
    pub companies_with_email: usize,
    pub companies_with_fantasy_name: usize,
    pub top_neighborhoods: Vec<BairroContagem>,
    pub recently_added: usize,
}

/// Lista empresas com filtro e paginação.
///
/// O texto de busca, quando presente, substitui o filtro de categoria em vez
/// de combinar com ele.
pub fn listar_empresas(db: &Database, filtro: &FiltroEmpresas) -> PaginaEmpresas {
    let mut empresas = db.todas_empresas();

    if let Some(categoria) = filtro.categoria.as_deref() {
        if !categoria.is_empty() && categoria != CATEGORIA_TODAS {
            empresas = db.empresas_por_categoria(categoria);
        }
    }

    if let Some(busca) = filtro.busca.as_deref() {
        if !busca.is_empty() {
            empresas = db.pesquisar_empresas(busca);
        }
    }

    let total = empresas.len();
    let companies = empresas
        .into_iter()
        .skip(filtro.offset)
        .take(filtro.limit)
        .map(resumo_empresa)
        .collect();

    PaginaEmpresas {
        companies,
        pagination: Paginacao {
            total,
            limit: filtro.limit,
            offset: filtro.offset,
            has_more: filtro.offset.saturating_add(filtro.limit) < total,
        },
    }
}

pub fn resumo_empresa(empresa: &Empresa) -> EmpresaResumo {
    EmpresaResumo {
        id: empresa.id.clone(),
        name: nome_exibicao(empresa).to_string(),
        category: empresa.descricao_cnae.clone(),
        address: format!(
            "{}, {} - {}",
            empresa.endereco.logradouro, empresa.endereco.numero, empresa.endereco.bairro
        ),
        phone: empresa.contato.telefone1.clone(),
        email: empresa.contato.email.clone(),
        is_open: empresa.ativa,
        category_id: empresa.categoria.clone(),
    }
}

pub fn buscar_detalhe(db: &Database, id: &str, localidade: &Localidade) -> Option<EmpresaDetalhe> {
    db.buscar_empresa(id)
        .map(|empresa| detalhe_empresa(empresa, localidade))
}

pub fn detalhe_empresa(empresa: &Empresa, localidade: &Localidade) -> EmpresaDetalhe {
    let endereco = &empresa.endereco;
    let complemento = endereco
        .complemento
        .as_deref()
        .map(|c| format!(" - {}", c))
        .unwrap_or_default();
    let full = format!(
        "{} {}, {}{} - {}, {} - {}",
        endereco.tipo_logradouro.as_deref().unwrap_or(""),
        endereco.logradouro,
        endereco.numero,
        complemento,
        endereco.bairro,
        localidade.cidade,
        localidade.uf
    )
    .trim_start()
    .to_string();

    EmpresaDetalhe {
        id: empresa.id.clone(),
        name: nome_exibicao(empresa).to_string(),
        legal_name: empresa.razao_social.clone(),
        cnpj: empresa.cnpj.clone(),
        category: empresa.descricao_cnae.clone(),
        category_id: empresa.categoria.clone(),
        description: format!("{} - {}", empresa.descricao_cnae, empresa.natureza_juridica),
        address: EnderecoDetalhe {
            full,
            street: endereco.logradouro.clone(),
            number: endereco.numero.clone(),
            complement: endereco.complemento.clone(),
            neighborhood: endereco.bairro.clone(),
            zip_code: endereco.cep.clone(),
            city: localidade.cidade.clone(),
            state: localidade.uf.clone(),
        },
        contact: ContatoDetalhe {
            phone1: empresa.contato.telefone1.clone(),
            phone2: empresa.contato.telefone2.clone(),
            email: empresa.contato.email.clone(),
        },
        business_info: DadosCadastrais {
            cnae: empresa.cnae_fiscal.clone(),
            legal_nature: empresa.natureza_juridica.clone(),
            size: empresa.porte.clone(),
            founded_at: empresa.data_inicio.clone(),
            status: empresa.situacao.clone(),
        },
        is_active: empresa.ativa,
        created_at: empresa.criado_em,
    }
}

pub fn categorias_com_contagem(db: &Database) -> Vec<CategoriaComContagem> {
    let contagem = contar_por_categoria(db);
    db.todas_categorias()
        .iter()
        .map(|categoria: &Categoria| CategoriaComContagem {
            id: categoria.id.clone(),
            name: categoria.nome.clone(),
            icon: categoria.icone.clone(),
            color: categoria.cor.clone(),
            cnaes: categoria.cnaes.clone(),
            count: contagem.get(categoria.id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

pub fn resumo_processamento(db: &Database) -> ResumoProcessamento {
    let empresas = db.todas_empresas();
    let contagem = contar_por_categoria(db);

    let categorias_usadas: BTreeSet<&str> =
        empresas.iter().map(|e| e.categoria.as_str()).collect();

    let companies_by_category = db
        .todas_categorias()
        .iter()
        .map(|categoria| {
            (
                categoria.nome.clone(),
                contagem.get(categoria.id.as_str()).copied().unwrap_or(0),
            )
        })
        .collect();

    ResumoProcessamento {
        total_companies: empresas.len(),
        active_companies: empresas.iter().filter(|e| e.ativa).count(),
        categories_used: categorias_usadas.len(),
        total_categories: db.todas_categorias().len(),
        companies_by_category,
    }
}

/// Estatísticas do painel administrativo avaliadas no instante `agora`.
pub fn estatisticas(db: &Database, agora: DateTime<Utc>) -> EstatisticasAdmin {
    let empresas = db.todas_empresas();
    let janela = Duration::days(DIAS_RECENTES);

    EstatisticasAdmin {
        resumo: resumo_processamento(db),
        companies_with_phone: empresas
            .iter()
            .filter(|e| e.contato.telefone1.as_deref().is_some_and(|t| !t.is_empty()))
            .count(),
        companies_with_email: empresas
            .iter()
            .filter(|e| e.contato.email.as_deref().is_some_and(|m| !m.is_empty()))
            .count(),
        companies_with_fantasy_name: empresas
            .iter()
            .filter(|e| !e.nome_fantasia.is_empty() && e.nome_fantasia != e.razao_social)
            .count(),
        top_neighborhoods: top_bairros(&empresas, TOP_BAIRROS),
        recently_added: empresas
            .iter()
            .filter(|e| agora.signed_duration_since(e.criado_em) <= janela)
            .count(),
    }
}

/// Bairros com mais empresas. Empates saem em ordem alfabética.
fn top_bairros(empresas: &[&Empresa], quantidade: usize) -> Vec<BairroContagem> {
    let mut contagem: HashMap<&str, usize> = HashMap::new();
    for empresa in empresas {
        *contagem.entry(empresa.endereco.bairro.as_str()).or_insert(0) += 1;
    }

    let mut bairros: Vec<(&str, usize)> = contagem.into_iter().collect();
    bairros.sort_by(|(nome_a, qtd_a), (nome_b, qtd_b)| {
        qtd_b.cmp(qtd_a).then_with(|| nome_a.cmp(nome_b))
    });

    bairros
        .into_iter()
        .take(quantidade)
        .map(|(nome, count)| BairroContagem {
            name: nome.to_string(),
            count,
        })
        .collect()
}

fn contar_por_categoria(db: &Database) -> HashMap<&str, usize> {
    let mut contagem = HashMap::new();
    for empresa in db.todas_empresas() {
        *contagem.entry(empresa.categoria.as_str()).or_insert(0) += 1;
    }
    contagem
}

fn nome_exibicao(empresa: &Empresa) -> &str {
    if empresa.nome_fantasia.is_empty() {
        &empresa.razao_social
    } else {
        &empresa.nome_fantasia
    }
}
