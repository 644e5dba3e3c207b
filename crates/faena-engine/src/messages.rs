//! Built-in user-facing text. Everything here is Spanish, the language the
//! backend's descriptors are written in.

pub const LOAD_FAILURE: &str = "No se pudo cargar el formulario. Revise su conexión e intente nuevamente.";
pub const SUBMIT_FAILURE: &str = "No se pudo enviar el formulario. Revise su conexión e intente nuevamente.";

pub const REQUIRED: &str = "Este campo es obligatorio";
pub const SELECT_AT_LEAST_ONE: &str = "Seleccione al menos una opción";
pub const CHOOSE_SUB_OPTION: &str = "Seleccione una sub-opción";

pub fn min_pictures(min: usize) -> String {
    format!("Agregue al menos {min} fotos")
}
