//! # idlgen
//!
//! Backend of an interface-definition compiler: takes a parsed and
//! validated IDL document and writes target-language source files, one per
//! top-level construct.
//!
//! ## Architecture
//!
//! ```text
//! Document (parsed IDL)
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Normalize   │  Dialect casing rules, applied once
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Type mapper + constant generator
//! │ (IR → dicts) │  build one dictionary per construct
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Template   │  Dialect templates render the text
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Output    │  <out>/<namespace>/<Name>.<ext>
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use idlgen::{Document, Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     out_dir: "generated".into(),
//!     language: "scala".to_string(),
//!     ..GeneratorConfig::default()
//! };
//!
//! let document = Document::load("service.json".as_ref())?;
//! let result = Generator::new(config)?.generate(&document)?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod dialect;
pub mod ir;
pub mod output;
pub mod template;

use std::path::PathBuf;

use tracing::{debug, info};

use codegen::{
    consts_dict, enum_dict, normalize_document, resolve_namespace, service_dict, struct_dict,
    Dictionary, TypeMapper,
};
use dialect::Dialect;
use ir::{Identifier, StructKind};
use template::{RenderError, TemplateSet};

pub use config::{GeneratorConfig, ServiceOption};
pub use diagnostic::{GeneratorError, Result};
pub use ir::Document;

/// Name of the file holding a document's constants.
const CONSTANTS_FILE: &str = "Constants";

/// Drives generation of whole documents for one dialect.
pub struct Generator {
    config: GeneratorConfig,
    dialect: Box<dyn Dialect>,
}

/// Outcome of generating one document.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Package the document was generated into.
    pub namespace: Identifier,
    /// Every file produced, in generation order. In a dry run, the files
    /// that would have been written.
    pub files: Vec<PathBuf>,
}

impl Generator {
    /// Creates a generator for the dialect named in `config.language`.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let dialect = dialect::create_dialect(&config.language)?;
        Ok(Self { config, dialect })
    }

    /// Creates a generator for an already constructed dialect.
    pub fn with_dialect(config: GeneratorConfig, dialect: Box<dyn Dialect>) -> Self {
        Self { config, dialect }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Generates every file for `document`.
    ///
    /// This runs the full pass:
    /// 1. Normalize identifier casing for the dialect
    /// 2. Resolve the namespace and its output directory
    /// 3. Collect includes for imports and scoped type names
    /// 4. Constants file, if the document declares any constants
    /// 5. One file per enum, struct and service, in declaration order
    ///
    /// The first error ends the pass. Files already written stay in place;
    /// callers should treat the document as not generated.
    pub fn generate(&self, document: &Document) -> Result<GenerateResult> {
        let dialect = self.dialect.as_ref();
        let templates = dialect.templates()?;

        // Phase 1: Normalize
        let doc = normalize_document(document, dialect);

        // Phase 2: Namespace
        let namespace = resolve_namespace(&doc, dialect);
        let dir = output::namespace_dir(&self.config.out_dir, &namespace);
        if !self.config.dry_run {
            output::ensure_directory(&dir)?;
        }

        // Phase 3: Includes
        let includes = doc.includes();
        let mapper = TypeMapper::new(dialect, &includes);

        let header = templates
            .header()
            .map_err(|e| template_error(dialect, "header", e))?;

        let mut emitter = Emitter {
            templates,
            dialect,
            header,
            dir,
            dry_run: self.config.dry_run,
            files: Vec::new(),
        };
        let options = &self.config.service_options;

        // Phase 4: Constants
        if !doc.consts.is_empty() {
            let dict = consts_dict(&namespace, &doc.consts, &includes, &mapper)
                .map_err(|e| e.in_construct(dialect.name(), CONSTANTS_FILE))?;
            emitter.emit(CONSTANTS_FILE, "consts", &dict)?;
        }

        // Phase 5: Enums, structs, services
        for e in &doc.enums {
            let dict = enum_dict(&namespace, e, &mapper);
            emitter.emit(e.name.name(), "enum", &dict)?;
        }

        for s in &doc.structs {
            let dict = struct_dict(s, &namespace, &includes, options, &mapper)
                .map_err(|e| e.in_construct(dialect.name(), s.name.name()))?;
            let template = match s.kind {
                StructKind::Union => "union",
                StructKind::Struct | StructKind::Exception => "struct",
            };
            emitter.emit(s.name.name(), template, &dict)?;
        }

        for service in &doc.services {
            let dict = service_dict(service, &namespace, &includes, options, &mapper)
                .map_err(|e| e.in_construct(dialect.name(), service.name.name()))?;
            emitter.emit(service.name.name(), "service", &dict)?;
        }

        info!(
            dialect = dialect.name(),
            namespace = %namespace,
            files = emitter.files.len(),
            dry_run = self.config.dry_run,
            "generated document"
        );

        Ok(GenerateResult {
            namespace,
            files: emitter.files,
        })
    }
}

/// Renders and writes construct files into one namespace directory.
struct Emitter<'g> {
    templates: &'g TemplateSet,
    dialect: &'g dyn Dialect,
    header: String,
    dir: PathBuf,
    dry_run: bool,
    files: Vec<PathBuf>,
}

impl Emitter<'_> {
    fn emit(&mut self, construct: &str, template: &str, dict: &Dictionary) -> Result<()> {
        let body = self
            .templates
            .render(template, dict)
            .map_err(|e| template_error(self.dialect, construct, e))?;

        let path = self
            .dir
            .join(format!("{}{}", construct, self.dialect.file_extension()));

        if self.dry_run {
            debug!(path = %path.display(), template, "dry run, not writing");
        } else {
            output::write_file(&path, &self.header, &body)?;
        }

        self.files.push(path);
        Ok(())
    }
}

fn template_error(dialect: &dyn Dialect, construct: &str, error: RenderError) -> GeneratorError {
    GeneratorError::Template {
        dialect: dialect.name().to_string(),
        construct: construct.to_string(),
        template: error.template,
        message: error.message,
    }
}
