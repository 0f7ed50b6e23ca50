//storage holds the MongoDB schema & async CRUD for generated heightmaps

pub mod models;

use crate::models::HeightmapDoc;
use bson::doc;
use futures_util::stream::TryStreamExt;
use log::{debug, info};
use mongodb::{Client, Collection, IndexModel, options::ClientOptions};

pub struct HeightmapStore {
    col: Collection<HeightmapDoc>,
}

impl HeightmapStore {
    // Connect and make sure the (name, seed) index exists
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("biomegen".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        let index_model = IndexModel::builder()
            .keys(doc! { "name": 1, "seed": 1 })
            .build();
        col.create_index(index_model).await?;
        debug!("heightmap store ready at {db_name}.{col_name}");

        Ok(Self { col })
    }

    pub async fn list_names(&self) -> mongodb::error::Result<Vec<String>> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut names = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            names.push(doc.name);
        }
        Ok(names)
    }

    pub async fn read_by_name(&self, name: &str) -> mongodb::error::Result<Option<HeightmapDoc>> {
        self.col.find_one(doc! { "name": name }).await
    }

    // Insert a heightmap, replacing any earlier one with the same name and seed
    pub async fn create(&self, doc_obj: HeightmapDoc) -> mongodb::error::Result<()> {
        let filter = doc! {
            "name": &doc_obj.name,
            "seed": doc_obj.seed,
        };
        let removed = self.col.delete_one(filter).await?;
        if removed.deleted_count > 0 {
            debug!("replacing stored heightmap {:?}", doc_obj.name);
        }

        info!(
            "storing heightmap {:?} ({}x{}, seed {})",
            doc_obj.name, doc_obj.width, doc_obj.height, doc_obj.seed
        );
        self.col.insert_one(doc_obj).await?;
        Ok(())
    }

    pub async fn read_by_seed(&self, seed: i64) -> mongodb::error::Result<Option<HeightmapDoc>> {
        self.col.find_one(doc! { "seed": seed }).await
    }

    pub async fn delete_by_seed(&self, seed: i64) -> mongodb::error::Result<()> {
        self.col.delete_one(doc! { "seed": seed }).await?;
        Ok(())
    }
}
