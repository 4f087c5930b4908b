//! Diretório de empresas locais a partir de planilhas de CNPJ.
//!
//! O núcleo é o motor de ingestão e consulta: [`process`] normaliza e carrega
//! lotes de linhas no [`database::Database`] em memória, e [`consultas`]
//! responde listagens, buscas e estatísticas. [`api`] expõe tudo via HTTP.

pub mod amostra;
pub mod api;
pub mod categorias;
pub mod config;
pub mod consultas;
pub mod database;
pub mod error;
pub mod models;
pub mod normalizacao;
pub mod process;
pub mod ui;
pub mod utils;
