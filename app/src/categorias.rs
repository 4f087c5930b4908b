use crate::models::Categoria;

/// Categoria atribuída a CNAEs que nenhuma categoria da tabela reivindica.
pub const CATEGORIA_OUTROS: &str = "outros";

/// Valor do filtro de categoria que significa "sem filtro".
pub const CATEGORIA_TODAS: &str = "all";

// (id, nome, ícone, classe de cor, CNAEs)
const CATEGORIAS_PADRAO: &[(&str, &str, &str, &str, &[&str])] = &[
    (
        "alimentacao",
        "Alimentação",
        "🍕",
        "bg-red-100 text-red-600",
        &["5611201", "5611203", "5620101", "5620102", "4721102", "4722901"],
    ),
    (
        "servicos",
        "Serviços",
        "🔧",
        "bg-blue-100 text-blue-600",
        &["9602501", "9602502", "7420001", "8230001", "7732201", "4313400"],
    ),
    (
        "comercio",
        "Comércio",
        "🛍️",
        "bg-green-100 text-green-600",
        &["4753900", "4541206", "4789099", "4711301", "4712100", "4713002"],
    ),
    (
        "saude",
        "Saúde",
        "🏥",
        "bg-purple-100 text-purple-600",
        &["8630501", "8630502", "8640201", "8650001", "4771701", "4773300"],
    ),
    (
        "educacao",
        "Educação",
        "📚",
        "bg-yellow-100 text-yellow-600",
        &["8513900", "8520001", "8531700", "8532500", "8541400", "8542200"],
    ),
    (
        "construcao",
        "Construção",
        "🏗️",
        "bg-orange-100 text-orange-600",
        &["4120400", "4212000", "4213800", "4222701", "4299501", "4311802"],
    ),
    (
        "transporte",
        "Transporte",
        "🚗",
        "bg-indigo-100 text-indigo-600",
        &["4930201", "4930202", "4950700", "5030101", "5091201", "5099801"],
    ),
    (
        "beleza",
        "Beleza",
        "💄",
        "bg-pink-100 text-pink-600",
        &["9602501", "9602502", "4772500", "4789004"],
    ),
];

/// Tabela de categorias carregada na criação do banco, na ordem de prioridade.
pub fn categorias_padrao() -> Vec<Categoria> {
    CATEGORIAS_PADRAO
        .iter()
        .map(|(id, nome, icone, cor, cnaes)| Categoria {
            id: id.to_string(),
            nome: nome.to_string(),
            icone: icone.to_string(),
            cor: cor.to_string(),
            cnaes: cnaes.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}

/// Primeira categoria (na ordem da tabela) que reivindica o CNAE, ou
/// [`CATEGORIA_OUTROS`]. Alguns CNAEs aparecem em mais de uma categoria
/// (cabeleireiros estão em serviços e beleza); vence a que vem antes.
pub fn classificar<'a, I>(categorias: I, cnae: &str) -> String
where
    I: IntoIterator<Item = &'a Categoria>,
{
    categorias
        .into_iter()
        .find(|categoria| categoria.cnaes.iter().any(|c| c == cnae))
        .map(|categoria| categoria.id.clone())
        .unwrap_or_else(|| CATEGORIA_OUTROS.to_string())
}
