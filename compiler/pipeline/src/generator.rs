//! Per-manifest scaffold generation.
//!
//! A [`Generator`] is bound to one module root, one manifest and one variant.
//! The manifest is parsed at most once per generator; every other query reads
//! the memoized AST.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use ast::{classify, DeclarationKind, ManifestAst, Variant};
use codegen::dumpers::full::ScaffoldLayout;
use codegen::DumperKind;
use parser::{AstProvider, ManifestParser};
use path::{
    manifest_path_for, manifests_dir, resolve_spec_path_with_extension, spec_dir,
    DEFAULT_MANIFEST_EXTENSION, DEFAULT_SPEC_EXTENSION,
};
use tracing::{debug, info};

use crate::writer::write_spec_file;
use crate::{PipelineError, Result};

/// Settings shared by every generator of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Extension of manifest files, without the dot
    pub manifest_extension: String,
    /// Extension of generated spec files, without the dot
    pub spec_extension: String,
    /// Dumper used to render scaffold content
    pub dumper: DumperKind,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            manifest_extension: DEFAULT_MANIFEST_EXTENSION.to_string(),
            spec_extension: DEFAULT_SPEC_EXTENSION.to_string(),
            dumper: DumperKind::default(),
        }
    }
}

/// Generates the scaffold of one manifest for one variant.
pub struct Generator {
    module_root: PathBuf,
    manifest_file: PathBuf,
    variant: Variant,
    options: GeneratorOptions,
    provider: Box<dyn AstProvider>,
    ast: OnceCell<ManifestAst>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("module_root", &self.module_root)
            .field("manifest_file", &self.manifest_file)
            .field("variant", &self.variant)
            .field("options", &self.options)
            .field("parsed", &self.ast.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Create a generator for `manifest_file` below `module_root`.
    ///
    /// Fails with [`PipelineError::MissingManifest`] when no manifest is given
    /// and with [`PipelineError::UnimplementedContract`] when the variant has no
    /// registered scaffold template.
    pub fn new(
        module_root: impl Into<PathBuf>,
        manifest_file: Option<PathBuf>,
        variant: Variant,
    ) -> Result<Self> {
        let manifest_file = manifest_file.ok_or(PipelineError::MissingManifest)?;
        if ScaffoldLayout::for_template(variant.template_id()).is_none() {
            return Err(PipelineError::UnimplementedContract(variant.template_id().to_string()));
        }

        Ok(Self {
            module_root: module_root.into(),
            manifest_file,
            variant,
            options: GeneratorOptions::default(),
            provider: Box::new(ManifestParser),
            ast: OnceCell::new(),
        })
    }

    /// Replace the run settings.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the AST source. Discards any AST parsed so far.
    pub fn with_provider(mut self, provider: Box<dyn AstProvider>) -> Self {
        self.provider = provider;
        self.ast = OnceCell::new();
        self
    }

    /// Root directory of the module.
    pub fn module_root(&self) -> &Path { &self.module_root }

    /// Manifest this generator reads.
    pub fn manifest_file(&self) -> &Path { &self.manifest_file }

    /// Variant this generator produces scaffolds for.
    pub fn variant(&self) -> Variant { self.variant }

    /// Run settings.
    pub fn options(&self) -> &GeneratorOptions { &self.options }

    /// The parsed manifest, parsing it on first access.
    pub fn ast(&self) -> Result<&ManifestAst> {
        if let Some(ast) = self.ast.get() {
            return Ok(ast);
        }
        debug!(manifest = %self.manifest_file.display(), "parsing manifest");
        let parsed = self.provider.parse(&self.manifest_file).map_err(|e| {
            PipelineError::MalformedManifest {
                path: self.manifest_file.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(self.ast.get_or_init(|| parsed))
    }

    /// Kind of the manifest's first declaration.
    pub fn declaration_kind(&self) -> Result<DeclarationKind> {
        let ast = self.ast()?;
        classify(ast).map_err(|e| malformed(ast.path(), e))
    }

    /// Whether the manifest declares this generator's variant.
    pub fn matches_variant(&self) -> Result<bool> {
        Ok(Variant::from_kind(&self.declaration_kind()?) == Some(self.variant))
    }

    /// Fully namespaced name of the manifest's first declaration.
    pub fn type_name(&self) -> Result<&str> {
        let ast = self.ast()?;
        let body = ast.body().map_err(|e| malformed(ast.path(), e))?;
        Ok(&body.name)
    }

    /// Spec directory of this generator's variant.
    pub fn spec_path(&self) -> PathBuf { spec_dir(&self.module_root, self.variant) }

    /// Manifests directory of the module.
    pub fn lib_path(&self) -> PathBuf { manifests_dir(&self.module_root) }

    /// Manifest path the autoloader expects for the declared name.
    pub fn item_path(&self) -> Result<PathBuf> {
        let name = self.type_name()?;
        Ok(manifest_path_for(&self.module_root, name, &self.options.manifest_extension))
    }

    /// Output path of the scaffold, without generating it.
    pub fn item_spec_path(&self) -> Result<PathBuf> {
        resolve_output(&self.module_root, self.ast()?, self.variant, &self.options.spec_extension)
    }

    /// Render the scaffold text with the configured dumper.
    pub fn generate_content(&self) -> Result<String> {
        let ast = self.ast()?;
        ensure_variant(ast, self.variant)?;
        Ok(self.options.dumper.dumper().dump(ast)?)
    }

    /// Render the scaffold and write it to [`item_spec_path`](Self::item_spec_path),
    /// replacing any existing file. Returns the written path.
    pub fn generate_spec_file(&self) -> Result<PathBuf> {
        let path = self.item_spec_path()?;
        let content = self.generate_content()?;
        write_spec_file(&path, &content)?;
        info!(manifest = %self.manifest_file.display(), spec = %path.display(), "generated scaffold");
        Ok(path)
    }

    /// Alias of [`generate_spec_file`](Self::generate_spec_file).
    pub fn run(&self) -> Result<PathBuf> { self.generate_spec_file() }
}

/// Resolve where the scaffold of `ast` belongs for `expected`.
///
/// Classes and definitions are named after their declaration. Node names are
/// host matches rather than namespaces, so node scaffolds are named after the
/// manifest file instead.
pub fn resolve_output(
    module_root: &Path,
    ast: &ManifestAst,
    expected: Variant,
    spec_extension: &str,
) -> Result<PathBuf> {
    ensure_variant(ast, expected)?;
    let body = ast.body().map_err(|e| malformed(ast.path(), e))?;
    let name = match expected {
        Variant::Node => ast
            .path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| body.name.clone()),
        Variant::Class | Variant::Definition => body.name.clone(),
    };
    Ok(resolve_spec_path_with_extension(&name, expected, module_root, spec_extension))
}

fn ensure_variant(ast: &ManifestAst, expected: Variant) -> Result<()> {
    let kind = classify(ast).map_err(|e| malformed(ast.path(), e))?;
    match Variant::from_kind(&kind) {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(PipelineError::UnsupportedVariant {
            path: ast.path().to_path_buf(),
            expected,
            found: found.singular_name().to_string(),
        }),
        None => Err(PipelineError::UnsupportedVariant {
            path: ast.path().to_path_buf(),
            expected,
            found: match kind {
                DeclarationKind::Other(keyword) => keyword,
                other => format!("{:?}", other),
            },
        }),
    }
}

fn malformed(path: &Path, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::MalformedManifest { path: path.to_path_buf(), reason: err.to_string() }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use ast::{Declaration, Parameter};

    use super::*;

    struct CountingProvider {
        calls: Rc<Cell<usize>>,
        ast: ManifestAst,
    }

    impl AstProvider for CountingProvider {
        fn parse(&self, _path: &Path) -> parser::Result<ManifestAst> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.ast.clone())
        }
    }

    fn define_ast() -> ManifestAst {
        ManifestAst::new(
            "/mod/manifests/one_define.pp",
            vec![Declaration::new(DeclarationKind::Definition, "one_resource::one_define")
                .with_parameters(vec![Parameter::required("one")])],
        )
    }

    #[test]
    fn ast_is_parsed_once() {
        let calls = Rc::new(Cell::new(0));
        let generator = Generator::new(
            "/mod",
            Some(PathBuf::from("/mod/manifests/one_define.pp")),
            Variant::Definition,
        )
        .expect("generator")
        .with_provider(Box::new(CountingProvider { calls: Rc::clone(&calls), ast: define_ast() }));

        generator.item_spec_path().expect("path");
        generator.generate_content().expect("content");
        generator.type_name().expect("name");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn missing_manifest_is_rejected() {
        match Generator::new("/mod", None, Variant::Class) {
            Err(PipelineError::MissingManifest) => {}
            other => panic!("expected MissingManifest, got {:?}", other),
        }
    }

    #[test]
    fn resolve_output_checks_variant() {
        let ast = define_ast();
        let path = resolve_output(Path::new("/mod"), &ast, Variant::Definition, "rb")
            .expect("definition resolves");
        assert_eq!(path, PathBuf::from("/mod/spec/defines/one_define_spec.rb"));

        match resolve_output(Path::new("/mod"), &ast, Variant::Class, "rb") {
            Err(PipelineError::UnsupportedVariant { expected, found, .. }) => {
                assert_eq!(expected, Variant::Class);
                assert_eq!(found, "define");
            }
            other => panic!("expected UnsupportedVariant, got {:?}", other),
        }
    }

    #[test]
    fn node_output_uses_manifest_stem() {
        let ast = ManifestAst::new(
            "/mod/manifests/site.pp",
            vec![Declaration::new(DeclarationKind::Node, "web01.example.com")],
        );
        let path = resolve_output(Path::new("/mod"), &ast, Variant::Node, "rb").expect("node");
        assert_eq!(path, PathBuf::from("/mod/spec/nodes/site_spec.rb"));
    }

    #[test]
    fn empty_manifest_is_malformed() {
        let ast = ManifestAst::new("/mod/manifests/empty.pp", vec![]);
        match resolve_output(Path::new("/mod"), &ast, Variant::Class, "rb") {
            Err(PipelineError::MalformedManifest { path, .. }) => {
                assert_eq!(path, PathBuf::from("/mod/manifests/empty.pp"));
            }
            other => panic!("expected MalformedManifest, got {:?}", other),
        }
    }
}
