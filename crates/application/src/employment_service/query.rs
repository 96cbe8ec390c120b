use alumnet_domain::{EmploymentRecord, LifecycleFilter};

use crate::employment_ports::{
    EmploymentListQuery, EmploymentListing, EmploymentRecordFilter, EmploymentRecordOrdering,
    ResultWindow,
};

use super::*;

impl EmploymentService {
    /// Lists one page of live records inside the caller scope.
    pub async fn list(
        &self,
        actor: &Principal,
        query: EmploymentListQuery,
    ) -> AppResult<EmploymentListing> {
        let scope = self.scope_for(actor).await?;
        let filter = EmploymentRecordFilter::new(LifecycleFilter::Live)
            .with_search(query.search.as_deref())
            .within(&scope);

        let records = self
            .store
            .find_many(
                &filter,
                EmploymentRecordOrdering::Column {
                    key: query.sort_key,
                    order: query.order,
                },
                ResultWindow::from(query.page),
            )
            .await?;
        let total = self.store.count(&filter).await?;

        Ok(EmploymentListing {
            records,
            total,
            page: query.page,
        })
    }

    /// Lists trashed records inside the caller scope, most recently trashed first.
    pub async fn list_trash(&self, actor: &Principal) -> AppResult<Vec<EmploymentRecord>> {
        let scope = self.scope_for(actor).await?;
        let filter = EmploymentRecordFilter::new(LifecycleFilter::Trashed).within(&scope);

        self.store
            .find_many(
                &filter,
                EmploymentRecordOrdering::RecentlyTrashed,
                ResultWindow::unbounded(),
            )
            .await
    }
}
