use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Representa um usuário vindo do banco de dados.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,

    // Nunca sai no JSON.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub profile_id: i32,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resposta de autenticação com o token e o usuário logado.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,   // ID do usuário
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// Dados para login.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "required"))]
    pub username: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Criação/edição de usuário pelo módulo de usuários.
// `password` é obrigatória na criação e opcional na edição.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[validate(length(min = 3, message = "O usuário deve ter no mínimo 3 caracteres."))]
    pub username: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
    pub profile_id: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_de_senha_nunca_sai_no_json() {
        let user = User {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            full_name: "Administrador".into(),
            password_hash: "$2b$12$segredo".into(),
            profile_id: 1,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("segredo"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("\"username\":\"admin\""));
    }

    #[test]
    fn claims_fazem_round_trip_pelo_jwt() {
        use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

        let now = Utc::now().timestamp() as usize;
        let claims = Claims { sub: 42, iat: now, exp: now + 3600 };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"segredo-de-teste"),
        )
        .unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"segredo-de-teste"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, 42);
        assert_eq!(decoded.claims.exp, claims.exp);
    }
}
