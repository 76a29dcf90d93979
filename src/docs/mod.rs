//! OpenAPI document for the products API and a Swagger UI page that renders
//! it. Paths and schemas are filled in by the router from the handlers'
//! extractors, so only the document-level metadata lives here.

use aide::openapi::{Contact, ExternalDocumentation, Info, License, OpenApi};

pub const SPEC_PATH: &str = "/api-docs.json";
pub const UI_PATH: &str = "/api-docs";

const PROJECT_URL: &str = "https://github.com/products-api/products-api";

pub fn api_doc(title: &str) -> OpenApi {
    OpenApi {
        info: Info {
            title: title.to_string(),
            description: Some("Create, list, fetch and clear products".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact: Some(Contact {
                name: Some("Products API maintainers".to_string()),
                url: Some(format!("{}/issues", PROJECT_URL)),
                ..Contact::default()
            }),
            license: Some(License {
                name: "MIT".to_string(),
                url: Some("https://opensource.org/licenses/MIT".to_string()),
                ..License::default()
            }),
            ..Info::default()
        },
        external_docs: Some(ExternalDocumentation {
            description: Some("Source and usage notes".to_string()),
            url: PROJECT_URL.to_string(),
            ..ExternalDocumentation::default()
        }),
        ..OpenApi::default()
    }
}

pub fn swagger_ui_page(title: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: "{SPEC_PATH}", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##
    )
}
