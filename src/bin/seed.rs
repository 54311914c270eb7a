// src/bin/seed.rs
//
// Popula o banco com os dados de exemplo: usuários básicos, provedores
// fictícios, demandas e ações. Usuários e provedores são criados por aqui
// (seeding) — a API não expõe criação de usuários.

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::env;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).compact().init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("🚀 Iniciando seed...");

    let senha_padrao = "123456";

    // Hasheia a senha fora do runtime (bcrypt é CPU-bound)
    let hashed = tokio::task::spawn_blocking(move || {
        bcrypt::hash(senha_padrao, bcrypt::DEFAULT_COST)
    })
    .await??;

    // cria usuários básicos
    let usuarios = [
        ("Administrador", "admin@teste.com", "ADMIN"),
        ("Consultor João", "joao@teste.com", "CONSULTOR"),
        ("Atendente Ana", "ana@teste.com", "ATENDENTE"),
    ];

    for (name, email, role) in usuarios {
        sqlx::query(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4::user_role)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hashed)
        .bind(role)
        .execute(&pool)
        .await?;
    }

    // lista de provedores fictícios
    let provedores = [
        ("Tech Solutions", "Maria Silva", "contato@tech.com", "11999990001"),
        ("HealthCare Plus", "Carlos Souza", "suporte@health.com", "11999990002"),
        ("EducaWeb", "Ana Pereira", "contato@educa.com", "11999990003"),
        ("AgroData", "João Oliveira", "atendimento@agro.com", "11999990004"),
        ("BuildSoft", "Fernanda Lima", "contato@build.com", "11999990005"),
    ];

    for (nome_fantasia, responsavel, email, telefone) in provedores {
        let provider_id = criar_provedor(&pool, nome_fantasia, responsavel, email, telefone).await?;

        // cria 3 demandas por provedor
        for i in 1..=3u32 {
            let titulo = format!("Demanda {} - {}", i, nome_fantasia);
            let descricao = format!("Descrição da demanda {} para {}", i, nome_fantasia);
            let tipo = if i % 2 == 0 { "MANUTENCAO" } else { "CONFIGURACAO" };
            let status = if i % 2 == 0 { "EM_ANDAMENTO" } else { "PENDENTE" };
            let prioridade = if i % 3 == 0 { "ALTA" } else { "MEDIA" };

            let row = sqlx::query(
                r#"
                INSERT INTO demands (titulo, descricao, tipo, status, prioridade, provider_id)
                VALUES ($1, $2, $3::demand_type, $4::demand_status, $5::demand_priority, $6)
                RETURNING id
                "#,
            )
            .bind(&titulo)
            .bind(&descricao)
            .bind(tipo)
            .bind(status)
            .bind(prioridade)
            .bind(provider_id)
            .fetch_one(&pool)
            .await?;
            let demand_id: Uuid = row.get("id");

            // cria 2 ações por demanda
            for j in 1..=2u32 {
                let descricao_acao = format!("Ação {} da demanda {}", j, titulo);
                let tipo_acao = if j % 2 == 0 { "ANALISE" } else { "RESOLUCAO" };

                sqlx::query(
                    r#"
                    INSERT INTO actions (descricao, tipo, demand_id)
                    VALUES ($1, $2::action_type, $3)
                    "#,
                )
                .bind(&descricao_acao)
                .bind(tipo_acao)
                .bind(demand_id)
                .execute(&pool)
                .await?;
            }
        }
    }

    tracing::info!("✅ Seed concluído!");

    Ok(())
}

async fn criar_provedor(
    pool: &PgPool,
    nome_fantasia: &str,
    responsavel: &str,
    email: &str,
    telefone: &str,
) -> anyhow::Result<Uuid> {
    let row = sqlx::query(
        r#"
        INSERT INTO providers (nome_fantasia, responsavel, email, telefone)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(nome_fantasia)
    .bind(responsavel)
    .bind(email)
    .bind(telefone)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}
