use std::collections::BTreeMap;

use crate::categorias::{categorias_padrao, classificar};
use crate::models::{Categoria, Empresa};

/// Banco em memória: empresas por id e a tabela de categorias.
///
/// As empresas ficam num `BTreeMap`, então listagens saem ordenadas por id e a
/// paginação é estável entre chamadas. As categorias mantêm a ordem de
/// inserção, que define a prioridade na classificação por CNAE.
#[derive(Debug, Clone)]
pub struct Database {
    empresas: BTreeMap<String, Empresa>,
    categorias: Vec<Categoria>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Banco vazio com as categorias padrão.
    pub fn new() -> Self {
        Self::with_categorias(categorias_padrao())
    }

    /// Banco vazio com uma tabela própria. Ids repetidos ficam na posição da
    /// primeira ocorrência, com o conteúdo da última.
    pub fn with_categorias(categorias: Vec<Categoria>) -> Self {
        let mut db = Self {
            empresas: BTreeMap::new(),
            categorias: Vec::with_capacity(categorias.len()),
        };
        for categoria in categorias {
            db.adicionar_categoria(categoria);
        }
        db
    }

    // Empresas

    /// Insere ou substitui (mesmo id: a última escrita vence).
    pub fn inserir_empresa(&mut self, empresa: Empresa) {
        self.empresas.insert(empresa.id.clone(), empresa);
    }

    pub fn buscar_empresa(&self, id: &str) -> Option<&Empresa> {
        self.empresas.get(id)
    }

    pub fn todas_empresas(&self) -> Vec<&Empresa> {
        self.empresas.values().collect()
    }

    pub fn empresas_por_categoria(&self, categoria_id: &str) -> Vec<&Empresa> {
        self.empresas
            .values()
            .filter(|empresa| empresa.categoria == categoria_id)
            .collect()
    }

    /// Busca sem diferenciar maiúsculas em nome fantasia, razão social,
    /// descrição do CNAE e bairro.
    pub fn pesquisar_empresas(&self, texto: &str) -> Vec<&Empresa> {
        let termo = texto.to_lowercase();
        self.empresas
            .values()
            .filter(|empresa| {
                [
                    &empresa.nome_fantasia,
                    &empresa.razao_social,
                    &empresa.descricao_cnae,
                    &empresa.endereco.bairro,
                ]
                .iter()
                .any(|campo| campo.to_lowercase().contains(&termo))
            })
            .collect()
    }

    /// Apaga só as empresas; as categorias continuam.
    pub fn limpar_empresas(&mut self) {
        self.empresas.clear();
    }

    pub fn total_empresas(&self) -> usize {
        self.empresas.len()
    }

    // Categorias

    pub fn buscar_categoria(&self, id: &str) -> Option<&Categoria> {
        self.categorias.iter().find(|categoria| categoria.id == id)
    }

    pub fn todas_categorias(&self) -> &[Categoria] {
        &self.categorias
    }

    /// Categoria nova entra no fim da tabela; id repetido substitui a antiga
    /// sem mudar sua posição.
    pub fn adicionar_categoria(&mut self, categoria: Categoria) {
        match self.categorias.iter_mut().find(|c| c.id == categoria.id) {
            Some(existente) => *existente = categoria,
            None => self.categorias.push(categoria),
        }
    }

    pub fn categoria_por_cnae(&self, cnae: &str) -> String {
        classificar(&self.categorias, cnae)
    }
}
