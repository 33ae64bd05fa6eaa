//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, collection_handler, level_handler, review_handler, user_handler,
};
use crate::domain::{
    Collection, CreateCollection, CreateLevel, CreateReview, Level, LevelInfo, Review,
    ReviewWithLevel, UpdateCollection, UpdateLevel, UserResponse, UserRole,
};
use crate::services::{Profile, TokenResponse};
use crate::types::{SuccessResponse, UpdatedResponse};

/// OpenAPI documentation for the Puzzlebase API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Puzzlebase",
        version = "0.1.0",
        description = "A puzzle level platform: author levels, group them into collections, review them",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        // User endpoints
        user_handler::get_current_user,
        user_handler::get_profile,
        // Level endpoints
        level_handler::create_level,
        level_handler::get_level,
        level_handler::update_level,
        // Review endpoints
        review_handler::latest_reviews,
        review_handler::create_review,
        // Collection endpoints
        collection_handler::get_collection,
        collection_handler::create_collection,
        collection_handler::update_collection,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            Level,
            LevelInfo,
            CreateLevel,
            UpdateLevel,
            Review,
            ReviewWithLevel,
            CreateReview,
            Collection,
            CreateCollection,
            UpdateCollection,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Aggregates and acknowledgements
            Profile,
            SuccessResponse,
            UpdatedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session handling"),
        (name = "Users", description = "Accounts and profile aggregation"),
        (name = "Levels", description = "Level authoring and updates"),
        (name = "Reviews", description = "Level reviews and the latest-reviews feed"),
        (name = "Collections", description = "Ordered level collections")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
