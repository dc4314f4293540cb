pub mod errors;
pub mod id;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{settings::BookSettings, InitCtx, Module};
use serde_json::json;

use id::IdGenerator;
use service::BookService;

/// Books module: owns the shelf and exposes it under `/books`.
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(settings: &BookSettings) -> Self {
        Self {
            service: BookService::new(IdGenerator::new(settings.id_length)),
        }
    }

    pub fn service(&self) -> &BookService {
        &self.service
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            id_length = ctx.settings.books.id_length,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let fail = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/FailResponse" }
                    }
                }
            })
        };
        let book_id_param = json!({
            "name": "bookId",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "description": "Only one filter is applied per request, in the order name, reading, finished.",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "name", "in": "query", "schema": { "type": "string" },
                              "description": "Case-insensitive substring of the book name" },
                            { "name": "reading", "in": "query", "schema": { "type": "string" },
                              "description": "1 for books being read, anything else for the rest" },
                            { "name": "finished", "in": "query", "schema": { "type": "string" },
                              "description": "1 for finished books, anything else for the rest" }
                        ],
                        "responses": {
                            "200": {
                                "description": "Book summaries in insertion order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "status": { "type": "string" },
                                                "data": {
                                                    "type": "object",
                                                    "properties": {
                                                        "books": {
                                                            "type": "array",
                                                            "items": { "$ref": "#/components/schemas/BookSummary" }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Book added; data.bookId holds the new id" },
                            "400": fail("Missing name, readPage above pageCount, or malformed body"),
                            "500": fail("Book could not be stored")
                        }
                    }
                },
                "/{bookId}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [book_id_param.clone()],
                        "responses": {
                            "200": {
                                "description": "Full book record under data.book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "status": { "type": "string" },
                                                "data": {
                                                    "type": "object",
                                                    "properties": {
                                                        "book": { "$ref": "#/components/schemas/Book" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            },
                            "404": fail("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "parameters": [book_id_param.clone()],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                                }
                            }
                        },
                        "responses": {
                            "200": { "description": "Book updated" },
                            "400": fail("Missing name, readPage above pageCount, or malformed body"),
                            "404": fail("Book not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [book_id_param.clone()],
                        "responses": {
                            "200": { "description": "Book deleted" },
                            "404": fail("Book not found")
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "year": { "type": ["integer", "null"] },
                            "author": { "type": ["string", "null"] },
                            "summary": { "type": ["string", "null"] },
                            "publisher": { "type": ["string", "null"] },
                            "pageCount": { "type": "integer", "minimum": 0 },
                            "readPage": { "type": "integer", "minimum": 0 },
                            "finished": {
                                "type": "boolean",
                                "description": "readPage == pageCount when the book was added"
                            },
                            "reading": { "type": "boolean" },
                            "insertedAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "name", "pageCount", "readPage", "finished",
                                     "reading", "insertedAt", "updatedAt"]
                    },
                    "BookSummary": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "publisher": { "type": ["string", "null"] }
                        },
                        "required": ["id", "name"]
                    },
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "year": { "type": "integer" },
                            "author": { "type": "string" },
                            "summary": { "type": "string" },
                            "publisher": { "type": "string" },
                            "pageCount": { "type": "integer", "minimum": 0 },
                            "readPage": { "type": "integer", "minimum": 0 },
                            "reading": { "type": "boolean" }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.service.count().await;
        tracing::info!(module = self.name(), books, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.service.count().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped; in-memory shelf discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(settings: &BookSettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(settings))
}
