use std::sync::Arc;

use swc_core::{
    common::{errors::HANDLER, SourceMapper},
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};
use tracing::warn;

mod ast;
mod attrs;
pub mod config;
mod element;
pub mod error;
pub mod escape;
pub mod parts;
pub mod print;
pub mod receiver;
pub mod tag;
pub mod template;
pub mod transform;

pub use config::TransformConfig;
pub use error::{ErrorKind, JsxTemplateError};
pub use receiver::ReceiverInjector;
pub use transform::{CompilerState, JsxTemplateTransform};

/// Run the receiver pass (if enabled) and the JSX pass over one program.
pub fn transform_program(
    program: &mut Program,
    config: &TransformConfig,
    source_map: Option<Arc<dyn SourceMapper>>,
) -> Result<(), JsxTemplateError> {
    if config.inject_receiver {
        program.visit_mut_with(&mut ReceiverInjector::new(config.receiver.clone()));
    }

    let mut transform = JsxTemplateTransform::new(config.clone(), source_map);
    program.visit_mut_with(&mut transform);
    match transform.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let config = match metadata.get_transform_plugin_config() {
        Some(raw) => TransformConfig::from_json(&raw).unwrap_or_else(|err| {
            warn!(%err, "invalid plugin config, falling back to defaults");
            TransformConfig::default()
        }),
        None => TransformConfig::default(),
    };

    let source_map: Option<Arc<dyn SourceMapper>> = Some(Arc::new(metadata.source_map));

    if let Err(err) = transform_program(&mut program, &config, source_map) {
        HANDLER.with(|handler| {
            handler
                .struct_span_err(err.span, &err.kind.to_string())
                .emit()
        });
    }

    program
}
