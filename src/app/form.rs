//! Create/edit form state

use crate::models::{Estado, Tablero, TableroDraft, TableroId};

/// Form fields, in focus order
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FormField {
    Nombre,
    Ubicacion,
    Marca,
    Capacidad,
    AnoFabricacion,
    AnoInstalacion,
    Estado,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Nombre,
        FormField::Ubicacion,
        FormField::Marca,
        FormField::Capacidad,
        FormField::AnoFabricacion,
        FormField::AnoInstalacion,
        FormField::Estado,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Nombre => "Nombre",
            FormField::Ubicacion => "Ubicación",
            FormField::Marca => "Marca",
            FormField::Capacidad => "Capacidad (A)",
            FormField::AnoFabricacion => "Año de fabricación",
            FormField::AnoInstalacion => "Año de instalación",
            FormField::Estado => "Estado",
        }
    }

    pub fn next(&self) -> FormField {
        let i = self.index();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> FormField {
        let i = self.index();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormField::Capacidad | FormField::AnoFabricacion | FormField::AnoInstalacion
        )
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Submission state of a form screen
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
}

#[derive(Clone, Debug, Default)]
pub struct TableroForm {
    pub nombre: String,
    pub ubicacion: String,
    pub marca: String,
    pub capacidad: String,
    pub ano_fabricacion: String,
    pub ano_instalacion: String,
    pub estado: Estado,
    pub focused: Option<FormField>,
    pub status: FormStatus,
    /// Set when editing an existing record
    pub editing_id: Option<TableroId>,
}

impl TableroForm {
    pub fn new() -> Self {
        TableroForm {
            focused: Some(FormField::Nombre),
            ..Default::default()
        }
    }

    pub fn from_tablero(t: &Tablero) -> Self {
        TableroForm {
            nombre: t.nombre.clone(),
            ubicacion: t.ubicacion.clone(),
            marca: t.marca.clone(),
            capacidad: t.capacidad_amperios.to_string(),
            ano_fabricacion: t.ano_fabricacion.to_string(),
            ano_instalacion: t.ano_instalacion.to_string(),
            estado: t.estado,
            focused: Some(FormField::Nombre),
            status: FormStatus::Idle,
            editing_id: Some(t.id.clone()),
        }
    }

    pub fn focused(&self) -> FormField {
        self.focused.unwrap_or(FormField::Nombre)
    }

    /// Display value of a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Nombre => &self.nombre,
            FormField::Ubicacion => &self.ubicacion,
            FormField::Marca => &self.marca,
            FormField::Capacidad => &self.capacidad,
            FormField::AnoFabricacion => &self.ano_fabricacion,
            FormField::AnoInstalacion => &self.ano_instalacion,
            FormField::Estado => self.estado.as_str(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Nombre => Some(&mut self.nombre),
            FormField::Ubicacion => Some(&mut self.ubicacion),
            FormField::Marca => Some(&mut self.marca),
            FormField::Capacidad => Some(&mut self.capacidad),
            FormField::AnoFabricacion => Some(&mut self.ano_fabricacion),
            FormField::AnoInstalacion => Some(&mut self.ano_instalacion),
            FormField::Estado => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = Some(self.focused().next());
    }

    pub fn prev_field(&mut self) {
        self.focused = Some(self.focused().prev());
    }

    /// Type into the focused field. Numeric fields accept digits only;
    /// on the estado field a space cycles the value.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focused();
        if field == FormField::Estado {
            if c == ' ' {
                self.cycle_estado();
            }
            return;
        }
        if field.is_numeric() && !c.is_ascii_digit() {
            return;
        }
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    pub fn cycle_estado(&mut self) {
        if self.focused() == FormField::Estado {
            self.estado = self.estado.next();
        }
    }

    pub fn draft(&self) -> TableroDraft {
        TableroDraft::from_text(
            &self.nombre,
            &self.ubicacion,
            &self.marca,
            &self.capacidad,
            &self.ano_fabricacion,
            &self.ano_instalacion,
            self.estado,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        let mut form = TableroForm::new();
        form.prev_field();
        assert_eq!(form.focused(), FormField::Estado);
        form.next_field();
        assert_eq!(form.focused(), FormField::Nombre);
    }

    #[test]
    fn test_numeric_fields_reject_letters() {
        let mut form = TableroForm::new();
        form.focused = Some(FormField::Capacidad);
        for c in "1a2".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.capacidad, "12");
        form.backspace();
        assert_eq!(form.capacidad, "1");
        assert_eq!(form.draft().capacidad_amperios, Some(1));
    }

    #[test]
    fn test_estado_cycles_only_when_focused() {
        let mut form = TableroForm::new();
        form.cycle_estado();
        assert_eq!(form.estado, Estado::Operativo);
        form.focused = Some(FormField::Estado);
        form.insert_char(' ');
        assert_eq!(form.estado, Estado::Mantenimiento);
        form.cycle_estado();
        assert_eq!(form.estado, Estado::FueraDeServicio);
        form.insert_char('x');
        assert_eq!(form.value(FormField::Estado), "Fuera de servicio");
    }
}
