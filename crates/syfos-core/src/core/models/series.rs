/// Per-sample parameters implied by the van der Waals approach law.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApproachParameterSeries {
    /// Tip-sample distance `piezo - deflection`.
    pub true_distance: Vec<f64>,
    /// Force `deflection * k_c`.
    pub force: Vec<f64>,
    pub spring_constant: Vec<f64>,
    pub radius: Vec<f64>,
    pub hamaker: Vec<f64>,
}

/// Per-sample parameters implied by the Hertzian contact law.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactParameterSeries {
    /// Indentation `piezo - deflection`.
    pub deformation: Vec<f64>,
    pub force: Vec<f64>,
    pub spring_constant: Vec<f64>,
    pub radius: Vec<f64>,
    pub reduced_modulus: Vec<f64>,
}

impl ApproachParameterSeries {
    pub fn len(&self) -> usize {
        self.true_distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.true_distance.is_empty()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            true_distance: Vec::with_capacity(capacity),
            force: Vec::with_capacity(capacity),
            spring_constant: Vec::with_capacity(capacity),
            radius: Vec::with_capacity(capacity),
            hamaker: Vec::with_capacity(capacity),
        }
    }
}

impl ContactParameterSeries {
    pub fn len(&self) -> usize {
        self.deformation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deformation.is_empty()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            deformation: Vec::with_capacity(capacity),
            force: Vec::with_capacity(capacity),
            spring_constant: Vec::with_capacity(capacity),
            radius: Vec::with_capacity(capacity),
            reduced_modulus: Vec::with_capacity(capacity),
        }
    }
}
