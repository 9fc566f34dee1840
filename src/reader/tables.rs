use std::collections::BTreeMap;

use arrow::datatypes::Schema;
use log::debug;
use ndarray::{Array1, Array2};

use super::utils::{append_classes, append_f64, append_float_rows, get_column};
use super::{DatasetId, RecordBatchIterator, SurveyReader};
use crate::dataset::{PhotometricCatalog, Selection, SliceRows, SpectroscopicCatalog};
use crate::error::SurveyError;
use crate::schema::{columns, NUM_BANDS};

/// A catalog that can be decoded from one bundle file.
pub trait CatalogTable: SliceRows {
    /// Which file holds the table
    const DATASET: DatasetId;

    /// Decode every batch into a table; `schema` is the file schema.
    fn from_batches(schema: &Schema, batches: RecordBatchIterator) -> Result<Self, SurveyError>;
}

impl CatalogTable for SpectroscopicCatalog {
    const DATASET: DatasetId = DatasetId::SpectroCatalog;

    fn from_batches(schema: &Schema, batches: RecordBatchIterator) -> Result<Self, SurveyError> {
        let required = [columns::CLASS, columns::REDSHIFT, columns::REDSHIFT_ERR];
        let extra_names: Vec<String> = schema
            .fields()
            .iter()
            .filter(|f| !required.contains(&f.name().as_str()) && f.data_type().is_numeric())
            .map(|f| f.name().clone())
            .collect();

        let mut class = Vec::new();
        let mut redshift = Vec::new();
        let mut redshift_err = Vec::new();
        let mut extra: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for batch in batches {
            let batch = batch?;
            append_classes(get_column(&batch, columns::CLASS)?, columns::CLASS, &mut class)?;
            append_f64(get_column(&batch, columns::REDSHIFT)?, columns::REDSHIFT, &mut redshift)?;
            append_f64(
                get_column(&batch, columns::REDSHIFT_ERR)?,
                columns::REDSHIFT_ERR,
                &mut redshift_err,
            )?;
            for name in &extra_names {
                append_f64(
                    get_column(&batch, name)?,
                    name,
                    extra.entry(name.clone()).or_default(),
                )?;
            }
        }

        let mut catalog =
            SpectroscopicCatalog::new(class, Array1::from(redshift), Array1::from(redshift_err))?;
        for name in extra_names {
            let values = extra.remove(&name).unwrap_or_default();
            catalog = catalog.with_extra(name, Array1::from(values))?;
        }
        Ok(catalog)
    }
}

impl CatalogTable for PhotometricCatalog {
    const DATASET: DatasetId = DatasetId::PhotoCatalog;

    fn from_batches(_schema: &Schema, batches: RecordBatchIterator) -> Result<Self, SurveyError> {
        let mut magnitudes = Vec::new();
        let mut extinction = Vec::new();
        let mut rows = 0;

        for batch in batches {
            let batch = batch?;
            append_float_rows(
                get_column(&batch, columns::MAG)?.as_ref(),
                columns::MAG,
                NUM_BANDS,
                &mut magnitudes,
            )?;
            append_float_rows(
                get_column(&batch, columns::EXTINCTION)?.as_ref(),
                columns::EXTINCTION,
                NUM_BANDS,
                &mut extinction,
            )?;
            rows += batch.num_rows();
        }

        let to_matrix = |values: Vec<f32>| {
            Array2::from_shape_vec((rows, NUM_BANDS), values)
                .map_err(|e| SurveyError::Shape(e.to_string()))
        };
        PhotometricCatalog::new(to_matrix(magnitudes)?, to_matrix(extinction)?)
    }
}

impl SurveyReader {
    /// Load a whole catalog table
    ///
    /// ```rust,no_run
    /// use skysurvey::dataset::PhotometricCatalog;
    /// use skysurvey::reader::SurveyReader;
    ///
    /// let reader = SurveyReader::open("survey")?;
    /// let photo: PhotometricCatalog = reader.load_table()?;
    /// # Ok::<(), skysurvey::SurveyError>(())
    /// ```
    pub fn load_table<T: CatalogTable>(&self) -> Result<T, SurveyError> {
        let schema = self.file_metadata(T::DATASET).schema.clone();
        let table = T::from_batches(&schema, self.iter_batches(T::DATASET)?)?;
        if table.num_rows() != self.num_rows() {
            return Err(SurveyError::row_mismatch(
                &T::DATASET.to_string(),
                self.num_rows(),
                table.num_rows(),
            ));
        }
        debug!("Loaded {} ({} rows)", T::DATASET, table.num_rows());
        Ok(table)
    }

    /// Load only the selected rows of a catalog table
    pub fn load_table_rows<'a, T: CatalogTable>(
        &self,
        selection: impl Into<Selection<'a>>,
    ) -> Result<T, SurveyError> {
        let schema = self.file_metadata(T::DATASET).schema.clone();
        self.read_selected(selection.into(), |sorted| {
            T::from_batches(&schema, self.iter_batches_rows(T::DATASET, sorted)?)
        })
    }

    /// Load all three datasets and join them.
    pub fn load_dataset(&self) -> Result<crate::dataset::SurveyDataset, SurveyError> {
        crate::dataset::SurveyDataset::from_parts(
            self.load_array()?,
            self.load_table()?,
            self.load_table()?,
        )
    }
}
