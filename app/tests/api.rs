// Testes de ponta a ponta da API HTTP: cada teste sobe a aplicação com um
// banco novo em memória e conversa com ela só por requisições.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use conecta_cnpj::api::{configurar_rotas, AppState};
use conecta_cnpj::consultas::Localidade;
use conecta_cnpj::database::Database;

fn estado() -> web::Data<AppState> {
    web::Data::new(AppState::new(Database::new(), Localidade::default()))
}

macro_rules! app {
    ($estado:expr) => {
        test::init_service(
            App::new()
                .app_data($estado.clone())
                .configure(configurar_rotas),
        )
        .await
    };
}

fn tres_linhas_com_erro_na_segunda() -> Value {
    json!({
        "rows": [
            {
                "CNPJ": "00.335.250/0001-82",
                "Razão Social": "OLIVEIRA & CRUZ LTDA",
                "Nome Fantasia": "MUSIC CENTER",
                "CNAE Fiscal": 4753900,
                "Descrição CNAE Fiscal": "COM. VAREJO ELETRODOMÉSTICOS",
                "Logradouro": "ACNE I",
                "Bairro": "CENTRO",
                "CEP": 77016524,
                "Situação Cadastral": "ATIVA"
            },
            {
                "CNPJ": "00.362.448/0001-55",
                "CNAE Fiscal": "5611201",
                "Bairro": "CENTRO"
            },
            {
                "CNPJ": "02.378.576/0001-12",
                "Razão Social": "REGINEIA GOMES LTDA",
                "CNAE Fiscal": "9999999",
                "Bairro": "SETOR NORTE",
                "Telefone 1": "6332153206",
                "Situação Cadastral": "INAPTA"
            }
        ]
    })
}

#[actix_web::test]
async fn health_responde_ok() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn importacao_parcial_informa_contagem_e_erros() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .set_json(tres_linhas_com_erro_na_segunda())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["stats"]["totalProcessed"], 2);
    assert_eq!(body["stats"]["errors"], 1);
    assert_eq!(
        body["stats"]["errorDetails"][0],
        "Linha 2: CNPJ e Razão Social são obrigatórios"
    );
    assert_eq!(body["processingStats"]["totalCompanies"], 2);
    assert_eq!(body["processingStats"]["activeCompanies"], 1);
    assert_eq!(body["processingStats"]["totalCategories"], 8);

    assert_eq!(estado.db.lock().unwrap().total_empresas(), 2);
}

#[actix_web::test]
async fn importacao_sem_corpo_usa_amostra() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post().uri("/api/admin/upload").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["totalProcessed"], 53);
    assert_eq!(body["stats"]["errors"], 0);
    assert_eq!(body["processingStats"]["totalCompanies"], 53);
}

#[actix_web::test]
async fn importacao_mostra_no_maximo_dez_erros() {
    let estado = estado();
    let app = app!(estado);

    let linhas: Vec<Value> = (0..15).map(|i| json!({ "CNPJ": i.to_string() })).collect();
    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .set_json(json!({ "rows": linhas }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["totalProcessed"], 0);
    assert_eq!(body["stats"]["errors"], 15);
    assert_eq!(body["stats"]["errorDetails"].as_array().unwrap().len(), 10);
    assert_eq!(body["processingStats"]["totalCompanies"], 0);
}

#[actix_web::test]
async fn importacao_com_json_invalido_e_400() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"rows": [{"CNPJ": true}]}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("JSON inválido"));
}

fn linhas_geradas(total: usize) -> Vec<Value> {
    (0..total)
        .map(|i| {
            json!({
                "CNPJ": format!("{:014}", i + 1),
                "Razão Social": format!("EMPRESA GERADA {} LTDA", i),
                "Nome Fantasia": format!("LOJA {}", i),
                "CNAE Fiscal": "4753900",
                "Descrição CNAE Fiscal": "COMÉRCIO VAREJISTA DE ELETRODOMÉSTICOS",
                "Logradouro": "QUADRA 104 NORTE RUA NE 5",
                "Número": i.to_string(),
                "Bairro": "PLANO DIRETOR NORTE",
                "CEP": "77006020",
                "Telefone 1": "6332150000",
                "email": format!("contato{}@exemplo.com.br", i),
                "Situação Cadastral": "ATIVA"
            })
        })
        .collect()
}

#[actix_web::test]
async fn importacao_de_lote_grande() {
    let estado = estado();
    let app = app!(estado);

    let corpo = serde_json::to_vec(&json!({ "rows": linhas_geradas(2000) })).unwrap();
    assert!(corpo.len() > 256 * 1024);

    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .insert_header(("content-type", "application/json"))
        .set_payload(corpo)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["stats"]["totalProcessed"], 2000);
    assert_eq!(body["stats"]["errors"], 0);
    assert_eq!(body["processingStats"]["totalCompanies"], 2000);
}

#[actix_web::test]
async fn corpo_acima_do_limite_e_413_em_json() {
    let estado = web::Data::new(
        AppState::new(Database::new(), Localidade::default()).com_limite_corpo(1024),
    );
    let app = app!(estado);

    let corpo = serde_json::to_vec(&json!({ "rows": linhas_geradas(20) })).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .insert_header(("content-type", "application/json"))
        .set_payload(corpo)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 413);
    assert!(body["error"].as_str().unwrap().contains("1024 bytes"));
    assert_eq!(estado.db.lock().unwrap().total_empresas(), 0);
}

#[actix_web::test]
async fn listagem_filtra_pagina_e_busca() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .set_json(tres_linhas_com_erro_na_segunda())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/companies?category=comercio")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["companies"][0]["name"], "MUSIC CENTER");
    assert_eq!(body["companies"][0]["address"], "ACNE I, S/N - CENTRO");
    assert_eq!(body["companies"][0]["isOpen"], true);

    let req = test::TestRequest::get()
        .uri("/api/companies?search=setor%20norte")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["companies"][0]["categoryId"], "outros");
    assert_eq!(body["companies"][0]["phone"], "6332153206");

    let req = test::TestRequest::get()
        .uri("/api/companies?limit=1&offset=0")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["companies"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["limit"], 1);
    assert_eq!(body["pagination"]["hasMore"], true);

    let req = test::TestRequest::get()
        .uri("/api/companies?offset=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["companies"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["hasMore"], false);
    assert_eq!(body["pagination"]["limit"], 20);
}

#[actix_web::test]
async fn parametro_de_paginacao_invalido_e_400() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::get()
        .uri("/api/companies?limit=muitos")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn detalhe_e_404() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post()
        .uri("/api/admin/upload")
        .set_json(tres_linhas_com_erro_na_segunda())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/companies/00335250000182")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["legalName"], "OLIVEIRA & CRUZ LTDA");
    assert_eq!(body["cnpj"], "00.335.250/0001-82");
    assert_eq!(body["address"]["zipCode"], "77016524");
    assert_eq!(body["address"]["city"], "Palmas");
    assert_eq!(body["businessInfo"]["cnae"], "4753900");
    assert_eq!(body["categoryId"], "comercio");

    let req = test::TestRequest::get()
        .uri("/api/companies/00000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Empresa não encontrada");
}

#[actix_web::test]
async fn categorias_com_contagem_ao_vivo() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post().uri("/api/admin/upload").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let categorias = body.as_array().unwrap();
    assert_eq!(categorias.len(), 8);

    let alimentacao = categorias
        .iter()
        .find(|c| c["id"] == "alimentacao")
        .unwrap();
    assert_eq!(alimentacao["name"], "Alimentação");
    assert!(alimentacao["count"].as_u64().unwrap() > 0);
    assert!(alimentacao["cnaes"].as_array().unwrap().contains(&json!("5611201")));
}

#[actix_web::test]
async fn limpar_zera_estatisticas() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post().uri("/api/admin/upload").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post().uri("/api/admin/clear").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Banco de dados limpo com sucesso");
    assert_eq!(body["stats"]["totalCompanies"], 0);
    assert_eq!(body["stats"]["activeCompanies"], 0);

    let req = test::TestRequest::get().uri("/api/admin/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalCompanies"], 0);
    assert_eq!(stats["recentlyAdded"], 0);
    assert!(stats["companiesByCategory"]
        .as_object()
        .unwrap()
        .values()
        .all(|v| v == 0));
    assert_eq!(stats["totalCategories"], 8);
}

#[actix_web::test]
async fn estatisticas_apos_amostra() {
    let estado = estado();
    let app = app!(estado);

    let req = test::TestRequest::post().uri("/api/admin/upload").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/admin/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(stats["totalCompanies"], 53);
    assert_eq!(stats["activeCompanies"], 53);
    assert_eq!(stats["recentlyAdded"], 53);
    // telefone: 1 fixa + 25 geradas (índices pares de 0 a 48)
    assert_eq!(stats["companiesWithPhone"], 26);
    // e-mail: índices múltiplos de 3 de 0 a 48
    assert_eq!(stats["companiesWithEmail"], 17);
    assert_eq!(stats["companiesWithFantasyName"], 53);
    assert_eq!(stats["topNeighborhoods"].as_array().unwrap().len(), 5);
    assert_eq!(stats["topNeighborhoods"][0]["name"], "CENTRO");
}
