use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Gigs {
    Table,
    OwnerId,
    Status,
}

#[derive(DeriveIden)]
enum Bids {
    Table,
    GigId,
    FreelancerId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on gigs.owner_id for fetching a user's own gigs
        manager
            .create_index(
                Index::create()
                    .name("idx_gigs_owner_id")
                    .table(Gigs::Table)
                    .col(Gigs::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Index on gigs.status for the open-gigs listing
        manager
            .create_index(
                Index::create()
                    .name("idx_gigs_status")
                    .table(Gigs::Table)
                    .col(Gigs::Status)
                    .to_owned(),
            )
            .await?;

        // Index on bids.gig_id for fetching bids by gig and for the
        // reject-siblings update during hiring
        manager
            .create_index(
                Index::create()
                    .name("idx_bids_gig_id")
                    .table(Bids::Table)
                    .col(Bids::GigId)
                    .to_owned(),
            )
            .await?;

        // Index on bids.freelancer_id for fetching a freelancer's own bids
        manager
            .create_index(
                Index::create()
                    .name("idx_bids_freelancer_id")
                    .table(Bids::Table)
                    .col(Bids::FreelancerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_gigs_owner_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_gigs_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bids_gig_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bids_freelancer_id").to_owned())
            .await?;

        Ok(())
    }
}
