use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para registrar un examen médico
#[derive(Debug, Deserialize, Validate)]
pub struct RecordMedicalCheckRequest {
    pub driver_id: Uuid,
    pub passed: bool,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default)]
    pub opens_shift: bool,
}

// Request para editar las notas de un examen
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMedicalCheckNotesRequest {
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub opens_shift: bool,
}
